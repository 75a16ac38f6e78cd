mod report;
mod run;

pub use report::RunReport;
pub use run::run_cleanup;
