use notion_store_client::{RecordStore, http_client::ReqwestStoreClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects WOD_STORE_TOKEN in env and a container id as argv[1]
    let token = match std::env::var("WOD_STORE_TOKEN") {
        Ok(t) => t,
        Err(_) => {
            eprintln!("WOD_STORE_TOKEN missing");
            return Ok(());
        }
    };
    let container_id = std::env::args().nth(1).unwrap_or_default();
    let base_url =
        std::env::var("WOD_STORE_BASE_URL").unwrap_or_else(|_| "https://api.notion.com".into());

    let client = ReqwestStoreClient::new(&base_url, secrecy::SecretString::new(token.into()));
    let children = client.list_children(&container_id).await?;
    for child in &children {
        println!("{}\t{}\t{}", child.id, child.kind, child.title());
    }
    Ok(())
}
