use crate::{Order, Product, StressAck, SystemStatus, User, UserSummary};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The route template. For fixed routes this is also the effective path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The effective path for this request instance.
    ///
    /// Routes carrying path or query parameters override this; everything
    /// else falls back to [`Self::PATH`].
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Look up a user by email. The gateway only returns a summary;
/// follow up with [`GetUserRequest`] to obtain the wallet balance.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

impl ApiRequest for LoginRequest {
    type Response = UserSummary;
    const PATH: &'static str = "/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Create a new user. The server assigns the id and the starting wallet.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

impl ApiRequest for RegisterRequest {
    type Response = User;
    const PATH: &'static str = "/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Fetch the full user record (including wallet) by id.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub id: i64,
}

impl ApiRequest for GetUserRequest {
    type Response = User;
    const PATH: &'static str = "/users/{id}";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/users/{}", self.id)
    }
}

/// List all products.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Response = Vec<Product>;
    const PATH: &'static str = "/products";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Create a product (admin operation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl ApiRequest for CreateProductRequest {
    type Response = Product;
    const PATH: &'static str = "/products";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// List the orders belonging to one user.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUserOrdersRequest {
    pub user_id: i64,
}

impl ApiRequest for ListUserOrdersRequest {
    type Response = Vec<Order>;
    const PATH: &'static str = "/orders/user/{id}";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/orders/user/{}", self.user_id)
    }
}

/// Place an order. On rejection the gateway responds with a `detail` message
/// (e.g. "Insufficient stock") that the client surfaces verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: u32,
}

impl ApiRequest for CreateOrderRequest {
    type Response = Order;
    const PATH: &'static str = "/orders";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Probe the gateway health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatusRequest;

impl ApiRequest for SystemStatusRequest {
    type Response = SystemStatus;
    const PATH: &'static str = "/status";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Trigger the backend load generator (admin operation).
#[derive(Debug, Serialize, Deserialize)]
pub struct StressRequest {
    pub seconds: u32,
    pub intensity: u32,
}

impl ApiRequest for StressRequest {
    type Response = StressAck;
    const PATH: &'static str = "/stress";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/stress?seconds={}&intensity={}", self.seconds, self.intensity)
    }
}
