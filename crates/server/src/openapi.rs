use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub details: Option<String> }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct ProductInputDoc {
    pub productsName: String,
    pub productDesc: String,
    pub productCategory: String,
    pub productPrice: f64,
    pub productSku: String,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct TransferInputDoc {
    pub productsId: i64,
    pub sourceStoreId: String,
    pub targetStoreId: String,
    pub quantity: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::inventory::store_inventory,
        crate::routes::inventory::transfer,
        crate::routes::alerts::low_stock,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            MessageDoc,
            ProductInputDoc,
            TransferInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "inventory"),
        (name = "alerts"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in [
            "/api/products",
            "/api/products/{id}",
            "/api/registerProducts",
            "/api/editProducts/{id}",
            "/api/deleteProducts/{id}",
            "/api/inventory/{storeId}",
            "/api/products/transfer",
            "/api/alerts/low-stock",
        ] {
            assert!(paths.contains(&p), "missing {p}");
        }
    }
}
