use std::convert::Infallible;
use log::info;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;
use warp::Filter;
use crate::domain::record_filter::RecordFilter;
use crate::registrar::registrar_facade::MutexRegistrar;
use crate::rest::rest_handlers::{delete_attendance, get_attendance, get_attendance_summary, post_promotions, put_attendance, SummaryQuery};

fn with_registrar(registrar: MutexRegistrar)
    -> impl Filter<Extract = (MutexRegistrar,), Error = Infallible> + Clone {
    warp::any().map(move || registrar.clone())
}

pub fn spawn_http_server(registrar: &MutexRegistrar, mut rx: Receiver<()>, port: u16) -> JoinHandle<()> {
    info!("Spawn HTTP server");

    let path = "attendance";
    let route_get_summary = warp::path(path)
        .and(warp::path("summary"))
        .and(warp::get())
        .and(with_registrar(registrar.clone()))
        .and(warp::query::<SummaryQuery>())
        .and_then(get_attendance_summary);

    let route_get_attendance = warp::path(path)
        .and(warp::path::end())
        .and(warp::get())
        .and(with_registrar(registrar.clone()))
        .and(warp::query::<RecordFilter>())
        .and_then(get_attendance);

    let route_put_attendance = warp::path(path)
        .and(warp::path::end())
        .and(warp::put())
        .and(with_registrar(registrar.clone()))
        .and(warp::body::json())
        .and_then(put_attendance);

    let route_delete_attendance = warp::path(path)
        .and(warp::delete())
        .and(with_registrar(registrar.clone()))
        .and(warp::path::param::<u32>())
        .and_then(delete_attendance);

    let route_post_promotions = warp::path("promotions")
        .and(warp::post())
        .and(with_registrar(registrar.clone()))
        .and(warp::body::json())
        .and_then(post_promotions);

    let routes = route_get_summary
        .or(route_get_attendance)
        .or(route_put_attendance)
        .or(route_delete_attendance)
        .or(route_post_promotions);

    let (address, server) = warp::serve(routes)
        .bind_with_graceful_shutdown(([127, 0, 0, 1], port), async move {
            let _ = rx.recv().await;
        });
    info!("Listening on {}", address);

    tokio::spawn(server)
}
