use std::process::ExitCode;

use apidom_lint::runner::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run().await
}
