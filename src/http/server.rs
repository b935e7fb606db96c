use log::info;
use rouille::{Request, Response};

use crate::{
    config::HttpConfig,
    http::error::ApiError,
    widget::{RawQuery, TrackAggregator, WidgetQuery, render::render_widget},
};

pub struct HttpServer {
    aggregator: TrackAggregator,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(aggregator: TrackAggregator, config: HttpConfig) -> Self {
        Self { aggregator, config }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = rouille::router!(request,
            (GET) (/embed/tracks) => {
                self.handle_tracks_embed(request)
            },
            _ => Response::text("not Found").with_status_code(404)
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn raw_query(request: &Request) -> RawQuery {
        RawQuery {
            kind: request.get_param("type"),
            user: request.get_param("user"),
            limit: request.get_param("limit"),
            period: request.get_param("period"),
        }
    }

    /// returns the widget page, or ApiError
    fn tracks_embed(&self, request: &Request) -> Result<Response, ApiError> {
        let raw = Self::raw_query(request);
        raw.check_required()?;
        self.aggregator.ensure_configured()?;

        let query = WidgetQuery::try_from(raw)?;
        let payload = self.aggregator.build(&query)?;

        Ok(Response::html(render_widget(&payload))
            .with_additional_header("Content-Security-Policy", "frame-ancestors *"))
    }

    fn handle_tracks_embed(&self, request: &Request) -> Response {
        match self.tracks_embed(request) {
            Ok(r) => r,
            Err(e) => e.into_response(),
        }
    }
}
