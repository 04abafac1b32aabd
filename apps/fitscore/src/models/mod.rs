pub mod candidate;
pub mod job;
pub mod scores;
pub mod transcript;

pub use candidate::CandidateProfile;
pub use job::{JobId, JobRequirements, RoleLevel};
pub use scores::{
    CandidateScore, CandidateSignals, FitBucket, RoleFitBreakdown, RoleFitFactors, ScoreBreakdown,
};
pub use transcript::{ChatTranscript, TurnIntent};
