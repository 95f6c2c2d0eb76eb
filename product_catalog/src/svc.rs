use tracing::{error, info};

use crate::{
    constant::{
        BAD_REQUEST, DATA_ACCESS_MESSAGE, INTERNAL_ERROR, NOT_FOUND, OK_RESPONSE,
        PRODUCT_NOT_FOUND, ROUTE_NOT_FOUND,
    },
    error::CatalogError,
    product::repo::ProductRepository,
    req::Request,
    utils::Reply,
};

#[derive(Debug, PartialEq)]
pub enum Route {
    All,
    Subset { start: i64, end: i64 },
    Recent,
    Count,
    Search(String),
    Single(i32),
}

impl Route {
    /// Maps a request onto a catalog read, or the reply to send instead.
    pub fn parse(request: &Request) -> Result<Self, Reply> {
        let path = request.path.trim_end_matches('/');

        match path {
            "/products" => match (request.param("start"), request.param("end")) {
                (None, None) => Ok(Route::All),
                (Some(start), Some(end)) => Ok(Route::Subset {
                    start: parse_position("start", start)?,
                    end: parse_position("end", end)?,
                }),
                _ => Err(Reply::error(
                    BAD_REQUEST,
                    "start and end must be given together",
                )),
            },
            "/products/recent" => Ok(Route::Recent),
            "/products/count" => Ok(Route::Count),
            "/products/search" => request
                .param("s")
                .map(|term| Route::Search(term.to_string()))
                .ok_or_else(|| Reply::error(BAD_REQUEST, "missing search term `s`")),
            _ => match path.strip_prefix("/products/") {
                Some(sku) if !sku.contains('/') => sku
                    .parse::<i32>()
                    .map(Route::Single)
                    .map_err(|_| Reply::error(BAD_REQUEST, "sku must be an integer")),
                _ => Err(Reply::error(NOT_FOUND, ROUTE_NOT_FOUND)),
            },
        }
    }
}

fn parse_position(name: &str, value: &str) -> Result<i64, Reply> {
    value
        .parse::<i64>()
        .map_err(|_| Reply::error(BAD_REQUEST, &format!("{} must be an integer", name)))
}

#[derive(Clone)]
pub struct Service {
    product_repo: ProductRepository,
}

impl Service {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, request: &Request) -> Reply {
        let route = match Route::parse(request) {
            Ok(route) => route,
            Err(reply) => return reply,
        };
        info!("{:?}", route);
        match self.dispatch(route).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("{:?}", e);
                Reply::error(INTERNAL_ERROR, DATA_ACCESS_MESSAGE)
            }
        }
    }

    async fn dispatch(&self, route: Route) -> Result<Reply, CatalogError> {
        let repo = &self.product_repo;
        let reply = match route {
            Route::All => Reply::ok(OK_RESPONSE, repo.list_all().await?),
            Route::Subset { start, end } => Reply::ok(OK_RESPONSE, repo.subset(start, end).await?),
            Route::Recent => Reply::ok(OK_RESPONSE, repo.list_recent().await?),
            Route::Count => Reply::ok(OK_RESPONSE, repo.count().await?),
            Route::Search(term) => Reply::ok(OK_RESPONSE, repo.search(&term).await?),
            Route::Single(sku) => match repo.get_by_sku(sku).await? {
                Some(detail) => Reply::ok(OK_RESPONSE, detail),
                None => return Ok(Reply::error(NOT_FOUND, PRODUCT_NOT_FOUND)),
            },
        };
        Ok(reply.unwrap_or_else(|e| {
            error!("Error serialize response: {}", e);
            Reply::error(INTERNAL_ERROR, "response could not be serialized")
        }))
    }
}
