use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    bookmarks::cli::run().await
}
