//! Backend routes.

use std::fmt;

/// Kind of image being uploaded; selects the upload route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadImageKind {
    /// Menu item or diner ID photo stored as a public asset. No auth needed.
    Item,
    /// Recipient identity document. Requires an authenticated recipient.
    Id,
}

/// Which set of a restaurant's orders to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    Active,
    Inactive,
}

/// One variant per backend route. Parameterized routes carry their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    // authentication
    Login,
    SignUpCustomer,
    SignUpRecipient,
    SignUpDiner,
    SignUpRestaurant,

    // customer
    Customer,
    UpdatePassword,
    GenerateOtp,
    VerifyOtp,
    ResetPassword,

    // recipient
    RecipientApproval,
    RecipientCredits,
    RecipientOrders,
    RecipientResponses,

    // restaurant
    Restaurants,
    RestaurantId,
    Restaurant { id: String },
    RestaurantOrders { id: String, filter: OrderFilter },
    CreateOrder { restaurant_id: String },
    CompleteOrder { restaurant_id: String, order_id: String },
    CancelOrder { order_id: String },

    // menu
    Menu { restaurant_id: String },
    AddMenuItem,
    UpdateMenuItem,
    DeleteMenuItem,

    // metric
    Metrics,

    // image upload
    UploadImage(UploadImageKind),

    // payment
    Payment,

    // admin
    AdminRecipients,
    AdminEditRecipient,
    AdminRecipientApproval,
    AdminLog,

    /// Any other path, used by raw calls.
    Custom(String),
}

impl Endpoint {
    /// Path relative to the API base URL, always starting with `/`.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/api/login".into(),
            Endpoint::SignUpCustomer => "/api/signup/customer".into(),
            Endpoint::SignUpRecipient => "/api/signup/recipient".into(),
            Endpoint::SignUpDiner => "/api/signup/diner".into(),
            Endpoint::SignUpRestaurant => "/api/signup/restaurant".into(),

            Endpoint::Customer => "/api/customer".into(),
            Endpoint::UpdatePassword => "/api/customer/password".into(),
            Endpoint::GenerateOtp => "/api/customer/password/generate-otp".into(),
            Endpoint::VerifyOtp => "/api/customer/password/verify-otp".into(),
            Endpoint::ResetPassword => "/api/customer/password/reset".into(),

            Endpoint::RecipientApproval => "/api/recipient/approval".into(),
            Endpoint::RecipientCredits => "/api/recipient/credits".into(),
            Endpoint::RecipientOrders => "/api/recipient/orders".into(),
            Endpoint::RecipientResponses => "/api/recipient/responses".into(),

            Endpoint::Restaurants => "/api/restaurant".into(),
            Endpoint::RestaurantId => "/api/restaurant/id".into(),
            Endpoint::Restaurant { id } => format!("/api/restaurant/{}", segment(id)),
            Endpoint::RestaurantOrders { id, filter } => {
                let which = match filter {
                    OrderFilter::Active => "active",
                    OrderFilter::Inactive => "inactive",
                };
                format!("/api/restaurant/{}/{}", segment(id), which)
            }
            Endpoint::CreateOrder { restaurant_id } => {
                format!("/api/restaurant/{}/order", segment(restaurant_id))
            }
            Endpoint::CompleteOrder {
                restaurant_id,
                order_id,
            } => format!(
                "/api/restaurant/{}/order/{}",
                segment(restaurant_id),
                segment(order_id)
            ),
            Endpoint::CancelOrder { order_id } => {
                format!("/api/restaurant/cancel/{}", segment(order_id))
            }

            Endpoint::Menu { restaurant_id } => format!("/api/menu/{}", segment(restaurant_id)),
            Endpoint::AddMenuItem => "/api/menu/add".into(),
            Endpoint::UpdateMenuItem => "/api/menu/update".into(),
            Endpoint::DeleteMenuItem => "/api/menu/delete".into(),

            Endpoint::Metrics => "/api/metric".into(),

            Endpoint::UploadImage(UploadImageKind::Item) => "/api/upload_image_url".into(),
            Endpoint::UploadImage(UploadImageKind::Id) => "/api/recipient/upload-id".into(),

            Endpoint::Payment => "/api/payment".into(),

            Endpoint::AdminRecipients => "/api/admin/recipients".into(),
            Endpoint::AdminEditRecipient => "/api/admin/edit-recipient".into(),
            Endpoint::AdminRecipientApproval => "/api/admin/recipient-approval".into(),
            Endpoint::AdminLog => "/api/admin/log".into(),

            Endpoint::Custom(path) => {
                if path.starts_with('/') {
                    path.clone()
                } else {
                    format!("/{}", path)
                }
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Percent-encode an id for use as a single path segment.
fn segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_paths() {
        assert_eq!(
            Endpoint::CreateOrder {
                restaurant_id: "42".into()
            }
            .path(),
            "/api/restaurant/42/order"
        );
        assert_eq!(
            Endpoint::CancelOrder {
                order_id: "o-7".into()
            }
            .path(),
            "/api/restaurant/cancel/o-7"
        );
        assert_eq!(
            Endpoint::Menu {
                restaurant_id: "9".into()
            }
            .path(),
            "/api/menu/9"
        );
        assert_eq!(
            Endpoint::RestaurantOrders {
                id: "3".into(),
                filter: OrderFilter::Inactive
            }
            .path(),
            "/api/restaurant/3/inactive"
        );
    }

    #[test]
    fn upload_route_depends_on_kind() {
        assert_eq!(
            Endpoint::UploadImage(UploadImageKind::Item).path(),
            "/api/upload_image_url"
        );
        assert_eq!(
            Endpoint::UploadImage(UploadImageKind::Id).path(),
            "/api/recipient/upload-id"
        );
    }

    #[test]
    fn ids_are_percent_encoded() {
        assert_eq!(
            Endpoint::Restaurant {
                id: "a b/c".into()
            }
            .path(),
            "/api/restaurant/a%20b%2Fc"
        );
    }

    #[test]
    fn custom_path_gets_leading_slash() {
        assert_eq!(Endpoint::Custom("api/social/feed".into()).path(), "/api/social/feed");
        assert_eq!(Endpoint::Custom("/api/metric".into()).path(), "/api/metric");
    }
}
