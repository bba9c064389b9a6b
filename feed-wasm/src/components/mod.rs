pub(crate) mod comments;
pub(crate) mod feed_panel;
pub(crate) mod post_card;
pub(crate) mod sign_up;
pub(crate) mod toast;
