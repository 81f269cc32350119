pub mod http_server;
pub mod rest_handlers;
