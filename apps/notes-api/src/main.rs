use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = notes_api::Args::parse();

	notes_api::run(args).await
}
