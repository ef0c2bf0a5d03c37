mod readme_oss_agent;

pub use readme_oss_agent::ReadmeOssAgent;
