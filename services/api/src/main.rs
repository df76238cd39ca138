use casn_rank_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("casn-rank error: {err}");
        std::process::exit(1);
    }
}
