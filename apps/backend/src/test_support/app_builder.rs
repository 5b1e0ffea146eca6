//! Test service builder.
//! Given an AppState, build an initialized Actix **test service** wrapped in
//! the same middleware stack as the server binary.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use actix_web::{
    web::{self, ServiceConfig},
    App,
};

use crate::error::AppError;
use crate::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use crate::state::app_state::AppState;

type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig) + Send>;

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        routes: None,
    }
}

pub struct TestAppBuilder {
    state: AppState,
    /// `None` serves the production routes.
    routes: Option<RoutesFn>,
}

impl TestAppBuilder {
    /// Serve the application's production routes (the default).
    pub fn with_prod_routes(mut self) -> Self {
        self.routes = None;
        self
    }

    /// Serve custom routes instead, e.g. to exercise an extractor in isolation.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + Send + 'static,
    {
        self.routes = Some(Box::new(f));
        self
    }

    pub async fn build(
        self,
    ) -> Result<
        impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
        AppError,
    > {
        let mut app = App::new().app_data(web::Data::new(self.state));

        app = match self.routes {
            None => app.configure(crate::routes::configure),
            Some(f) => app.configure(f),
        };

        let app = app
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace);

        Ok(actix_web::test::init_service(app).await)
    }
}
