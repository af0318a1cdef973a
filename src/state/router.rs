// ============================================================================
// ROUTER - Rutas y guard de autenticación
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Rutas desconocidas caen al login
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/dashboard" | "dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }
}

/// Guard de navegación: el dashboard exige sesión y el login
/// redirige al dashboard si ya la hay
pub fn resolve_route(requested: Route, signed_in: bool) -> Route {
    match (requested, signed_in) {
        (Route::Dashboard, false) => Route::Login,
        (Route::Login, true) => Route::Dashboard,
        (route, _) => route,
    }
}
