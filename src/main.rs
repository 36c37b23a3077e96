#[actix_web::main]
async fn main() -> std::io::Result<()> {
    school_certificates::run().await
}
