use utoipa::OpenApi;

pub(crate) const DRINKS_TAG: &str = "Drinks API";
pub(crate) const HEALTH_TAG: &str = "Health API";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::drinks::list_drinks,
        crate::api::drinks::drink_detail,
        crate::api::drinks::create_drink,
        crate::api::drinks::update_drink,
        crate::api::drinks::delete_drink,
        crate::api::health::health_check,
    ),
    tags(
        (name = DRINKS_TAG, description = "Drinks menu endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    ),
    info(
        title = "Barkeep API",
        description = "Drinks menu microservice",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
