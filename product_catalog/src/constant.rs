pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\n\r\n";
pub const NOT_FOUND: &str = "HTTP/1.1 404 NOT FOUND\r\nContent-Type: application/json\r\n\r\n";
pub const INTERNAL_ERROR: &str =
    "HTTP/1.1 500 Internal Error\r\nContent-Type: application/json\r\n\r\n";

pub const DATA_ACCESS_MESSAGE: &str = "Data could not be retrieved from the database.";
pub const PRODUCT_NOT_FOUND: &str = "product not found";
pub const ROUTE_NOT_FOUND: &str = "404 Not Found";
