use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match yt_live_bot_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
