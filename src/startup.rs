use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web::Data, App, HttpServer};

use crate::{
    routes::{callback_route, default_route, summary_route},
    services::{LineClient, Summarizer},
};

pub fn run(
    listener: TcpListener,
    summarizer: Data<Summarizer>,
    line_client: Data<LineClient>,
) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(summary_route::summary)
            .service(callback_route::callback)
            .app_data(summarizer.clone())
            .app_data(line_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
