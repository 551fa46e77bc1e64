//! Domain models for the ordering API.

pub mod cart;
pub mod notification;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartError, CartKey, CartLine};
pub use notification::Notification;
pub use order::{
    BillingDetails, Checkout, CheckoutError, DeliveryAddress, EidDay, MediaKind, MediaUpdate,
    Order, TimeSlot,
};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
