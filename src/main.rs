use actix_web::{middleware, web, App, HttpServer};

use roombook::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure data directory exists
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "data/app.db".to_string());
    let pool = db::init_pool(&database_url);
    db::run_migrations(&pool);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    log::info!("Meeting room booking server running at http://127.0.0.1:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(handlers::configure)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
