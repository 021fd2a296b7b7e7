use proc_macro::TokenStream;

mod controller;
mod module;

/// Attribute macro for defining a controller with automatic DI registration
///
/// # Example
/// ```ignore
/// use hello_mvc::controller;
///
/// #[controller(path = "/")]
/// pub struct ResponseBodyController {}
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::controller_attribute(attr, item)
}

/// Attribute macro for defining routes in an impl block
///
/// Methods carrying an HTTP method attribute become axum routes. The
/// return value is rendered according to `#[response_body]` and
/// `#[response_status]`; a `&mut ResponseWriter` parameter is supplied by
/// the generated handler.
///
/// # Example
/// ```ignore
/// #[routes(ResponseBodyController)]
/// impl ResponseBodyController {
///     #[response_status(OK)]
///     #[response_body]
///     #[get("/response-body-json-v2")]
///     async fn response_body_json_v2(&self) -> HelloData {
///         // ...
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn routes(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::routes_attribute(attr, item)
}

/// Attribute macro for defining a module with providers and controllers
///
/// # Example
/// ```ignore
/// use hello_mvc::module;
///
/// #[module(
///     controllers = [ResponseBodyController],
/// )]
/// pub struct ResponseModule;
/// ```
#[proc_macro_attribute]
pub fn module(attr: TokenStream, item: TokenStream) -> TokenStream {
    module::module_attribute(attr, item)
}

/// HTTP GET method attribute for controller methods
#[proc_macro_attribute]
pub fn get(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Pass-through, actual handling is done by #[routes] macro
    item
}

/// HTTP POST method attribute for controller methods
#[proc_macro_attribute]
pub fn post(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// HTTP PUT method attribute for controller methods
#[proc_macro_attribute]
pub fn put(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// HTTP DELETE method attribute for controller methods
#[proc_macro_attribute]
pub fn delete(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// HTTP PATCH method attribute for controller methods
#[proc_macro_attribute]
pub fn patch(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Serialize the method's return value straight into the response body
///
/// `String` and `&str` become `text/plain`, anything else is rendered as JSON.
#[proc_macro_attribute]
pub fn response_body(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Declare the status code of a route, e.g. `#[response_status(OK)]`
#[proc_macro_attribute]
pub fn response_status(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Parameter attribute for request body (JSON)
/// Wraps the parameter with axum::Json extractor
#[proc_macro_attribute]
pub fn body(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Parameter attribute for path parameters
/// Wraps the parameter with axum::extract::Path extractor
#[proc_macro_attribute]
pub fn param(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Parameter attribute for query string parameters
/// Wraps the parameter with axum::extract::Query extractor
#[proc_macro_attribute]
pub fn query(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
