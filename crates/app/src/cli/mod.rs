use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use jiff::tz::TimeZone;
use storefront::images::ImageUrls;
use storefront_app::{
    api::{HttpStorefrontApi, StorefrontApi},
    config::StorefrontConfig,
    navigation::{Navigator, Route},
    observability,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

mod checkout;
mod order;
mod orders;
mod pay;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Review the cart and place an order
    Checkout(checkout::CheckoutArgs),

    /// Show payment instructions and optionally upload a proof of payment
    Pay(pay::PayArgs),

    /// List orders
    Orders(orders::OrdersArgs),

    /// Show one order
    Order(order::OrderArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging).map_err(|error| error.to_string())?;

        let context = Context::new(&self.config)?;

        match self.command {
            Commands::Checkout(args) => checkout::run(&context, args).await,
            Commands::Pay(args) => pay::run(&context, args).await,
            Commands::Orders(args) => orders::run(&context, args).await,
            Commands::Order(args) => order::run(&context, args).await,
        }
    }
}

/// Shared dependencies of every command.
pub(crate) struct Context {
    pub(crate) api: Arc<dyn StorefrontApi>,
    pub(crate) navigator: Arc<TerminalNavigator>,
    pub(crate) images: ImageUrls,
    pub(crate) zone: TimeZone,
    pub(crate) redirect_delay: std::time::Duration,
}

impl Context {
    fn new(config: &StorefrontConfig) -> Result<Self, String> {
        config.validate().map_err(|error| error.to_string())?;

        Ok(Self {
            api: Arc::new(HttpStorefrontApi::new(
                config.api_url.clone(),
                config.api_token.clone(),
            )),
            navigator: Arc::new(TerminalNavigator::default()),
            images: ImageUrls::new(config.cdn_base.clone()),
            zone: config.time_zone().map_err(|error| error.to_string())?,
            redirect_delay: config.login_redirect_delay(),
        })
    }

    pub(crate) fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator) as Arc<dyn Navigator>
    }

    /// Wait out a login redirect scheduled by a page and point the user at the login page.
    pub(crate) async fn follow_redirect(
        &self,
        redirect: Option<JoinHandle<()>>,
        message: String,
    ) -> String {
        let Some(redirect) = redirect else {
            return message;
        };

        if let Err(error) = redirect.await {
            warn!(%error, "login redirect did not run");

            return message;
        }

        match self.navigator.last_route() {
            Some(Route::Login { return_to }) => {
                format!("{message}\nLog in, then return to {return_to}")
            }
            _ => message,
        }
    }
}

/// Records where the pages asked to go; the commands decide what to show next.
#[derive(Debug, Default)]
pub(crate) struct TerminalNavigator {
    routes: Mutex<Vec<Route>>,
}

impl TerminalNavigator {
    pub(crate) fn last_route(&self) -> Option<Route> {
        self.routes
            .lock()
            .ok()
            .and_then(|routes| routes.last().cloned())
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(path = %route.path(), "navigate");

        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }

    fn scroll_to_top(&self) {
        debug!("scroll to top");
    }
}
