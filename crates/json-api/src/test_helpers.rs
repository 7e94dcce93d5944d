//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;
use vitrine_app::{
    auth::{MockAuthService, User, UserRole, UserUuid},
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{
                CategoryRecord, CategoryUuid, SubSubcategoryRecord, SubcategoryRecord,
                SubcategoryUuid,
            },
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CATEGORY_UUID: CategoryUuid = CategoryUuid::from_uuid(Uuid::nil());

pub(crate) fn make_user(role: UserRole) -> User {
    User {
        uuid: UserUuid::from_uuid(Uuid::nil()),
        email: "shopper@example.com".to_owned(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(uuid: CategoryUuid, name: &str, order_index: i32) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        order_index,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_subcategory(category: CategoryUuid, name: &str) -> SubcategoryRecord {
    SubcategoryRecord {
        uuid: Uuid::now_v7().into(),
        category_uuid: category,
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        order_index: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_subsubcategory(
    subcategory: SubcategoryUuid,
    name: &str,
) -> SubSubcategoryRecord {
    SubSubcategoryRecord {
        uuid: Uuid::now_v7().into(),
        subcategory_uuid: subcategory,
        name: name.to_owned(),
        slug: name.to_lowercase().replace(' ', "-"),
        order_index: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Cordless Drill".to_owned(),
        reference: "DRL-18V".to_owned(),
        category_uuid: TEST_CATEGORY_UUID,
        subcategory_uuid: None,
        subsubcategory_uuid: None,
        description: "18V drill driver".to_owned(),
        price_excl_tax: 10_000,
        price_incl_tax: 12_000,
        images: vec!["https://cdn.example.com/drill.jpg".to_owned()],
        technical_specs: serde_json::Map::new(),
        technical_doc_url: None,
        video_url: None,
        stock: 4,
        is_available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Stand-in for the bearer middlewares: every request runs as an admin.
#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(make_user(UserRole::Admin));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn state(
    categories: MockCategoriesService,
    products: MockProductsService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        categories: Arc::new(categories),
        products: Arc::new(products),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(MockCategoriesService::new(), MockProductsService::new(), auth)
}

fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    admin_service(
        state(categories, MockProductsService::new(), MockAuthService::new()),
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    admin_service(
        state(MockCategoriesService::new(), products, MockAuthService::new()),
        route,
    )
}

/// Auth routes run without an injected user.
pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .push(route),
    )
}
