use partnerapply::PartnerApplyError;

#[tokio::main]
async fn main() {
    if let Err(e) = partnerapply::cli::run().await {
        eprintln!("Error: {e:#}");
        let status = e
            .downcast_ref::<PartnerApplyError>()
            .map(|err| err.code().exit_status())
            .unwrap_or(1);
        std::process::exit(status);
    }
}
