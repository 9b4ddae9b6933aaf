pub mod category_service;
pub mod inventory;
pub mod order_service;
pub mod product_service;
pub mod transaction_service;
pub mod user_service;
