pub mod category;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use money::Money;
pub use transaction::Transaction;
