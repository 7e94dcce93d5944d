//! Auth Handlers

pub(crate) mod current_user;
pub(crate) mod is_admin;
pub(crate) mod signin;
pub(crate) mod signout;
pub(crate) mod signup;
