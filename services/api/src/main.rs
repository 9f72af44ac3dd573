use lead_intake_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("lead intake error: {err}");
        std::process::exit(1);
    }
}
