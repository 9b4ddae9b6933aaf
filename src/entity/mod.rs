pub mod categories;
pub mod orders;
pub mod products;
pub mod transactions;
pub mod users;

pub use categories::Entity as Categories;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use transactions::Entity as Transactions;
pub use users::Entity as Users;
