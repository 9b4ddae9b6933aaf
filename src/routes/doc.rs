use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::CategoryRequest,
        orders::{CreateOrderRequest, ModifyOrderRequest},
        products::ProductRequest,
        transactions::CreateTransactionRequest,
        users::{ChangePasswordRequest, ModifyUserRequest, SignInRequest, SignUpRequest, TokenResponse},
    },
    error::ErrorData,
    models::{
        Category, CategoryProduct, CategoryWithProducts, Order, OrderProduct, Product, Role,
        Transaction, TransactionCustomer, TransactionProduct, UserProfile,
    },
    response::ApiResponse,
    routes::{admin, categories, health, orders, products, transactions, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::sign_up,
        users::sign_in,
        users::profile,
        users::modify,
        users::change_password,
        categories::list_categories,
        categories::get_category,
        categories::add_category,
        categories::modify_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::add_product,
        products::modify_product,
        products::delete_product,
        orders::create_order,
        orders::list_orders,
        orders::modify_order,
        orders::remove_order,
        transactions::record_transaction,
        transactions::list_transactions,
        transactions::get_transaction,
        admin::list_all_transactions
    ),
    components(
        schemas(
            Role,
            UserProfile,
            Category,
            CategoryProduct,
            CategoryWithProducts,
            Product,
            OrderProduct,
            Order,
            TransactionProduct,
            TransactionCustomer,
            Transaction,
            SignUpRequest,
            SignInRequest,
            ModifyUserRequest,
            ChangePasswordRequest,
            TokenResponse,
            CategoryRequest,
            ProductRequest,
            CreateOrderRequest,
            ModifyOrderRequest,
            CreateTransactionRequest,
            ErrorData,
            health::HealthData,
            ApiResponse<TokenResponse>,
            ApiResponse<UserProfile>,
            ApiResponse<Vec<Product>>,
            ApiResponse<Vec<Order>>,
            ApiResponse<Vec<Transaction>>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Account endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Transactions", description = "Settlement endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
