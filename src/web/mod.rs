mod api;

use std::net::TcpListener;

use actix_web::web::{Data, Query};
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use serde::Deserialize;
use tokio::task::{self, JoinHandle};
use tracing::info;

use crate::device::DeviceTable;

/// `?flush=true` resets the table after the response is rendered. Any other
/// value is ignored.
#[derive(Debug, Deserialize)]
struct FlushQuery {
    flush: Option<String>,
}

impl FlushQuery {
    fn flush(&self) -> bool {
        self.flush.as_deref() == Some("true")
    }
}

/// Serves the table on an already bound listener until the process exits
pub fn start(table: DeviceTable, listener: TcpListener) -> JoinHandle<std::io::Result<()>> {
    task::spawn_blocking(move || {
        if let Ok(addr) = listener.local_addr() {
            info!("Starting web server on http://{}", addr);
        }
        let sys = actix_rt::System::new();
        sys.block_on(async move {
            HttpServer::new(move || {
                App::new()
                    .app_data(Data::new(table.clone()))
                    .service(index)
                    .service(api::get_devices)
            })
            .workers(1)
            .listen(listener)?
            .run()
            .await
        })
    })
}

#[get("/")]
async fn index(table: Data<DeviceTable>, query: Query<FlushQuery>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(table.render_and_flush(query.flush()))
}
