//! Host scheduler integration: invocation arguments, the job context the
//! report logic sees, and the stdio protocol session.

mod args;
mod context;
mod session;

pub use args::JobArgs;
pub use context::{JobContext, JobInfo};
pub use session::SchedulerSession;
