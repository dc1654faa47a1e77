use clap::Args;

#[derive(Args)]
pub struct ChatArgs {
    /// User the message is sent on behalf of
    #[arg(long, default_value = "guest")]
    pub user: String,
    /// Message for the coach
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = super::build_service()?;
    let reply = service.chat(&args.user, &args.message.join(" ")).await;
    println!("{reply}");
    Ok(())
}
