/// Router Module Index
///
/// Routes are split by who may call them. Access control is attached per module in
/// `create_router` (authentication) and per route (role gates), never inside handlers.

/// Routes open to anonymous callers: health, landing page, sign-in and sign-up.
pub mod public;

/// Routes for any signed-in role. Routes that need a narrower role carry their own gate.
pub mod authenticated;

/// Routes restricted to the 'admin' role.
pub mod admin;
