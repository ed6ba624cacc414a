use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDoc {
    pub status_code: u16,
    pub error: String,
    pub message: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CountDoc {
    pub count: u64,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub identification: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDoc {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub identification: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct OperatorSummaryDoc {
    pub id: String,
    pub name: String,
    pub email: String,
    pub identification: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionDoc {
    pub access_token: String,
    pub operator: OperatorSummaryDoc,
}

#[derive(Serialize, ToSchema)]
pub struct OperatorUpdateDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub identification: Option<String>,
    /// Replaces the stored password hash when present.
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOwnerDoc {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerChangesDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDoc {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetailsDoc {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub restaurants: Vec<RestaurantDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurantDoc {
    pub name: String,
    pub description: Option<String>,
    pub history: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub principal_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub identification_number: Option<String>,
    /// Existing owner; ignored by the composite creation routes.
    pub owner_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantChangesDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub history: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub principal_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub identification_number: Option<String>,
    pub owner_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDoc {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub history: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub principal_image: Option<String>,
    pub images: Vec<String>,
    pub identification_number: Option<String>,
    pub owner_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecipeDoc {
    pub id: String,
    pub restaurant_id: String,
    pub recipe_id: String,
    pub created_at: String,
    pub recipe: RecipeDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetailsDoc {
    #[serde(flatten)]
    pub restaurant: RestaurantDoc,
    pub owner: Option<OwnerDoc>,
    pub restaurant_recipes: Vec<RestaurantRecipeDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantWithOwnerDoc {
    pub restaurant: NewRestaurantDoc,
    pub owner: NewOwnerDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRestaurantDoc {
    pub restaurant: NewRestaurantDoc,
    pub owner: NewOwnerDoc,
    /// Existing recipe ids, each at most once. An unknown or repeated id
    /// aborts the whole creation.
    pub recipe_ids: Vec<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetailsDoc {
    pub id: String,
    pub restaurant_id: String,
    pub recipe_id: String,
    pub created_at: String,
    pub restaurant: RestaurantDoc,
    pub recipe: RecipeDoc,
}

#[derive(Serialize, ToSchema)]
pub struct NewRecipeDoc {
    /// Optional caller-chosen id, generated when absent.
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecipeChangesDoc {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDoc {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRestaurantDoc {
    pub id: String,
    pub restaurant_id: String,
    pub recipe_id: String,
    pub created_at: String,
    pub restaurant: RestaurantDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailsDoc {
    #[serde(flatten)]
    pub recipe: RecipeDoc,
    pub restaurant_recipes: Vec<RecipeRestaurantDoc>,
}

#[derive(ToSchema)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Folder prefix for the object key.
    pub subfolder: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct UploadedImageDoc {
    pub url: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordCountsDoc {
    pub restaurants: u64,
    pub owners: u64,
    pub recipes: u64,
    pub operators: u64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealthDoc {
    /// `connected` or `disconnected`
    pub status: String,
    /// Round trip, e.g. `12ms`.
    pub response_time: Option<String>,
    pub error: Option<String>,
    pub stats: Option<RecordCountsDoc>,
}

/// Sizes in MiB.
#[derive(Serialize, ToSchema)]
pub struct MemoryUsageDoc {
    /// Resident set of the server process.
    pub used: u64,
    /// Physical memory of the host.
    pub total: u64,
    /// Process virtual size, detailed report only.
    #[serde(rename = "virtual")]
    pub virtual_mem: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct SystemInfoDoc {
    pub platform: String,
    pub arch: String,
    pub pid: u32,
}

#[derive(Serialize, ToSchema)]
pub struct HealthDoc {
    /// `healthy` or `unhealthy`
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
    pub database: DatabaseHealthDoc,
    pub memory: MemoryUsageDoc,
    pub system: Option<SystemInfoDoc>,
    pub environment: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessDoc {
    pub ready: bool,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct LivenessDoc {
    pub alive: bool,
    pub timestamp: String,
    pub uptime: f64,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Catastro Local API", description = "Restaurant, owner and recipe registry"),
    paths(
        crate::routes::health::health,
        crate::routes::health::detailed,
        crate::routes::health::ready,
        crate::routes::health::live,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::profile,
        crate::routes::restaurants::create,
        crate::routes::restaurants::create_with_owner,
        crate::routes::restaurants::create_complete,
        crate::routes::restaurants::list,
        crate::routes::restaurants::get,
        crate::routes::restaurants::update,
        crate::routes::restaurants::delete,
        crate::routes::restaurants::add_recipe,
        crate::routes::restaurants::remove_recipe,
        crate::routes::owners::create,
        crate::routes::owners::list,
        crate::routes::owners::get,
        crate::routes::owners::update,
        crate::routes::owners::delete,
        crate::routes::owners::restaurants,
        crate::routes::recipes::create,
        crate::routes::recipes::list,
        crate::routes::recipes::get,
        crate::routes::recipes::update,
        crate::routes::recipes::delete,
        crate::routes::recipes::by_restaurant,
        crate::routes::recipes::link_restaurant,
        crate::routes::recipes::unlink_restaurant,
        crate::routes::operators::create,
        crate::routes::operators::list,
        crate::routes::operators::get,
        crate::routes::operators::update,
        crate::routes::operators::delete,
        crate::routes::upload::upload_image,
    ),
    components(
        schemas(
            ErrorDoc,
            CountDoc,
            RegisterRequest,
            LoginRequest,
            OperatorDoc,
            OperatorSummaryDoc,
            SessionDoc,
            OperatorUpdateDoc,
            NewOwnerDoc,
            OwnerChangesDoc,
            OwnerDoc,
            OwnerDetailsDoc,
            NewRestaurantDoc,
            RestaurantChangesDoc,
            RestaurantDoc,
            RestaurantRecipeDoc,
            RestaurantDetailsDoc,
            RestaurantWithOwnerDoc,
            CompleteRestaurantDoc,
            LinkDetailsDoc,
            NewRecipeDoc,
            RecipeChangesDoc,
            RecipeDoc,
            RecipeRestaurantDoc,
            RecipeDetailsDoc,
            ImageUploadForm,
            UploadedImageDoc,
            RecordCountsDoc,
            DatabaseHealthDoc,
            MemoryUsageDoc,
            SystemInfoDoc,
            HealthDoc,
            ReadinessDoc,
            LivenessDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "restaurants"),
        (name = "owners"),
        (name = "recipes"),
        (name = "operators"),
        (name = "upload")
    )
)]
pub struct ApiDoc;
