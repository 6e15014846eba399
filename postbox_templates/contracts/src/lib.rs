use serde::Serialize;

pub trait TemplateService: Send + Sync + 'static {
    /// Render both the html and the plain text variant of the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<RenderedTemplate>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub html: String,
    pub text: String,
}

pub trait Template: Serialize {
    const NAME: &'static str;
    const HTML: &'static str;
    const TEXT: &'static str;
}

pub const BASE_HTML_TEMPLATE: &str = include_str!("../templates/base.html");
pub const BASE_TEXT_TEMPLATE: &str = include_str!("../templates/base.txt");
pub const SENDER_INFO_HTML_TEMPLATE: &str = include_str!("../templates/sender_info.html");
pub const SENDER_INFO_TEXT_TEMPLATE: &str = include_str!("../templates/sender_info.txt");

/// The logo embedded in every email, referenced from the html body via `cid:`.
pub mod logo {
    pub const CONTENT_ID: &str = "postbox-logo";
    pub const FILENAME: &str = "logo.png";
    pub const CONTENT_TYPE: &str = "image/png";
    pub const DATA: &[u8] = include_bytes!("../assets/logo.png");
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = stringify!($ident);
                const HTML: &'static str = include_str!(concat!("../templates/", $path, ".html"));
                const TEXT: &'static str = include_str!(concat!("../templates/", $path, ".txt"));
            }
        )*

        /// `(name, html, text)` of every template.
        pub const TEMPLATES: &[(&str, &str, &str)] = &[
            $( ($ident::NAME, $ident::HTML, $ident::TEXT) ),*
        ];
    };
}

templates! {
    ContactNotificationTemplate("contact_notification"),
    ContactConfirmationTemplate("contact_confirmation"),
}

/// Sent to the site owner for every accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactNotificationTemplate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub header: String,
    pub message: String,
    pub logo_cid: String,
}

/// Sent back to the submitter once the owner has been notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactConfirmationTemplate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub header: String,
    pub message: String,
    pub logo_cid: String,
}
