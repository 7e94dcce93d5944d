//! App Router

use salvo::Router;

use crate::{auth, categories, products, subcategories, subsubcategories};

/// Catalog and auth routes.
///
/// Reads are public. Writes go through the bearer middleware and then the
/// admin check, so an anonymous write is a 401 and a shopper's is a 403.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_routes())
        .push(
            Router::new()
                .hoop(auth::middleware::authenticate)
                .push(
                    Router::with_path("auth")
                        .push(Router::with_path("current-user").get(auth::current_user::handler))
                        .push(Router::with_path("signout").post(auth::signout::handler)),
                )
                .push(admin_routes()),
        )
}

fn public_routes() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("signup").post(auth::signup::handler))
                .push(Router::with_path("signin").post(auth::signin::handler))
                .push(Router::with_path("is-admin").get(auth::is_admin::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{category}").get(categories::get::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

fn admin_routes() -> Router {
    Router::new()
        .hoop(auth::middleware::require_admin)
        .push(
            Router::with_path("categories")
                .post(categories::create::handler)
                .push(Router::with_path("reorder").post(categories::reorder::handler))
                .push(
                    Router::with_path("{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("subcategories")
                .post(subcategories::create::handler)
                .push(Router::with_path("reorder").post(subcategories::reorder::handler))
                .push(
                    Router::with_path("{subcategory}")
                        .put(subcategories::update::handler)
                        .delete(subcategories::delete::handler),
                ),
        )
        .push(
            Router::with_path("subsubcategories")
                .post(subsubcategories::create::handler)
                .push(Router::with_path("reorder").post(subsubcategories::reorder::handler))
                .push(
                    Router::with_path("{subsubcategory}")
                        .put(subsubcategories::update::handler)
                        .delete(subsubcategories::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, http::header::AUTHORIZATION, prelude::*, test::TestClient};
    use serde_json::json;
    use uuid::Uuid;
    use vitrine_app::{
        auth::{AuthServiceError, MockAuthService, UserRole},
        domain::{categories::MockCategoriesService, products::MockProductsService},
    };

    use crate::test_helpers::{make_category, make_user, state};

    use super::*;

    fn make_service(
        categories: MockCategoriesService,
        products: MockProductsService,
        auth: MockAuthService,
    ) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state(categories, products, auth)))
                .push(app_router()),
        )
    }

    fn auth_as(role: UserRole) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "vs_token")
            .return_once(move |_| Ok(make_user(role)));

        auth
    }

    #[tokio::test]
    async fn category_tree_is_public() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_category_tree()
            .once()
            .return_once(|| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(
                categories,
                MockProductsService::new(),
                MockAuthService::new(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn anonymous_write_returns_401() {
        let mut categories = MockCategoriesService::new();

        categories.expect_create_category().never();

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Tools", "slug": "tools" }))
            .send(&make_service(
                categories,
                MockProductsService::new(),
                MockAuthService::new(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn unknown_token_returns_401() {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/products/{}", Uuid::now_v7()))
            .add_header(AUTHORIZATION, "Bearer vs_stale", true)
            .send(&make_service(
                MockCategoriesService::new(),
                MockProductsService::new(),
                auth,
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn shopper_write_returns_403() {
        let mut products = MockProductsService::new();

        products.expect_delete_product().never();

        let res = TestClient::delete(format!("http://example.com/products/{}", Uuid::now_v7()))
            .add_header(AUTHORIZATION, "Bearer vs_token", true)
            .send(&make_service(
                MockCategoriesService::new(),
                products,
                auth_as(UserRole::User),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn admin_write_reaches_the_handler() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(|new| new.name == "Tools")
            .return_once(|new| Ok(make_category(new.uuid, "Tools", 0)));

        let res = TestClient::post("http://example.com/categories")
            .add_header(AUTHORIZATION, "Bearer vs_token", true)
            .json(&json!({ "name": "Tools", "slug": "tools" }))
            .send(&make_service(
                categories,
                MockProductsService::new(),
                auth_as(UserRole::Admin),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
    }

    #[tokio::test]
    async fn current_user_requires_a_session_but_not_admin() {
        let res = TestClient::get("http://example.com/auth/current-user")
            .add_header(AUTHORIZATION, "Bearer vs_token", true)
            .send(&make_service(
                MockCategoriesService::new(),
                MockProductsService::new(),
                auth_as(UserRole::User),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }
}
