#[actix_web::main]
async fn main() -> std::io::Result<()> {
    noticepack_server::run().await
}
