//! pesanin - terminal front-end for the Pesanin ordering API
//!
//! State lives in the data directory between invocations, so a scan in one
//! command and a checkout in the next see the same cart and session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pesanin_client::api::{OrderListQuery, PageQuery};
use pesanin_client::config::{self, ClientConfig};
use pesanin_client::flows::ScanOutcome;
use pesanin_client::format::{format_date, format_price, format_time, status_label};
use pesanin_client::{
    AppContext, CheckoutError, ClientError, GuardDecision, HistoryNavigator, Order,
    OrderStatus, RouteGuard, routes,
};

/// pesanin - restaurant ordering from the terminal
#[derive(Parser, Debug)]
#[command(name = "pesanin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = config::env::API_URL)]
    api_url: Option<String>,

    /// Directory holding the persisted session, cart and logs
    #[arg(long, env = config::env::DATA_DIR)]
    data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = config::env::TIMEOUT_SECS)]
    timeout: Option<u64>,

    /// Also write a daily log file under the data directory
    #[arg(long)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Staff session ===
    /// Log in as staff
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "PESANIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in staff member
    Whoami {
        /// Re-read the profile from the server
        #[arg(long)]
        refresh: bool,
    },

    // === Customer ===
    /// Bind the cart to a table, as scanning its QR code does
    Scan {
        /// Table id from the QR code
        table_id: String,
    },

    /// List menu items available for ordering
    Menu {
        #[arg(long)]
        category: Option<String>,
    },

    /// Inspect or edit the cart
    #[command(subcommand)]
    Cart(CartCommands),

    /// Place the cart as an order
    Checkout {
        /// Note for the whole order
        #[arg(long)]
        note: Option<String>,
    },

    /// Show one order's status
    Status {
        order_id: String,

        /// Keep refreshing until the order is done or cancelled
        #[arg(short, long)]
        watch: bool,
    },

    /// Orders placed at the bound table
    Orders {
        #[arg(short, long)]
        watch: bool,
    },

    // === Back office ===
    /// Staff commands (login required)
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand, Debug)]
enum CartCommands {
    /// Show the cart
    #[command(alias = "ls")]
    Show,

    /// Add a menu item
    Add {
        menu_id: String,

        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        #[arg(long)]
        note: Option<String>,
    },

    /// Remove a menu item
    Remove { menu_id: String },

    /// Set a quantity; zero or less removes the item
    Qty {
        menu_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Replace an item's note
    Note { menu_id: String, note: String },

    /// Empty the cart and unbind the table
    Clear,
}

#[derive(Subcommand, Debug)]
enum AdminCommands {
    /// List orders
    Orders {
        #[arg(long)]
        status: Option<OrderStatus>,

        #[arg(long, default_value = "1")]
        page: u32,

        /// Keep refreshing
        #[arg(short, long)]
        watch: bool,
    },

    /// Move an order to a new status
    Status { order_id: String, status: OrderStatus },

    /// List tables
    Tables {
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Save a table's QR code as PNG
    Qr {
        table_id: String,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Daily sales report
    Report {
        /// Day as YYYY-MM-DD; today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // loads `.env` first so clap's env fallbacks see it too
    let mut config = ClientConfig::from_env()?;
    let cli = Cli::parse();

    if let Some(url) = cli.api_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }

    let storage = Arc::new(pesanin_client::FileStorage::new(&config.data_dir));

    let log_dir = cli.log_file.then(|| storage.dir().join("logs"));
    let _log_guard = pesanin_client::logging::init(log_dir.as_deref())
        .context("Failed to initialize logging")?;

    let navigator = Arc::new(HistoryNavigator::default());
    let ctx = AppContext::bootstrap(config, storage, navigator.clone()).await?;

    tracing::debug!(base_url = %ctx.config().base_url, "pesanin starting");

    run(&ctx, &navigator, cli.command).await
}

async fn run(ctx: &AppContext, navigator: &HistoryNavigator, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let user = ctx.login(&email, &password, None).await.map_err(friendly)?;
            println!("Login berhasil: {} ({})", user.name, user.role);
        }
        Commands::Logout => {
            ctx.logout().await;
            println!("Logout berhasil");
        }
        Commands::Whoami { refresh } => {
            if refresh {
                navigator.set_current(routes::ADMIN_DASHBOARD);
                require_staff(ctx).await?;
                ctx.refresh_profile().await.map_err(friendly)?;
            }
            let auth = ctx.auth().read().await;
            match auth.user() {
                Some(user) => println!("{} <{}> {}", user.name, user.email, user.role),
                None => println!("Belum login"),
            }
        }
        Commands::Scan { table_id } => {
            navigator.set_current(routes::scan(&table_id));
            match ctx.scan_table(&table_id).await {
                ScanOutcome::Bound(table) => {
                    println!("Meja {} terhubung. Silakan pilih menu.", table.table_number)
                }
                ScanOutcome::NotFound(e) => bail!("Meja tidak ditemukan: {}", e.user_message()),
            }
        }
        Commands::Menu { category } => {
            let menus = ctx
                .api()
                .available_menus(category.as_deref())
                .await
                .map_err(friendly)?;
            if menus.is_empty() {
                println!("Belum ada menu tersedia");
            }
            for menu in menus {
                println!("{:<24} {:<28} {:>14}", menu.id, menu.name, format_price(menu.price));
            }
        }
        Commands::Cart(cmd) => cart(ctx, cmd).await?,
        Commands::Checkout { note } => {
            navigator.set_current(routes::CUSTOMER_CHECKOUT);
            match ctx.checkout(note).await {
                Ok(order) => {
                    println!("Pesanan dibuat: {}", order.id);
                    print_order(&order);
                }
                Err(CheckoutError::NoTable) => bail!("Silakan scan QR code meja terlebih dahulu"),
                Err(CheckoutError::EmptyCart) => bail!("Keranjang masih kosong"),
                Err(CheckoutError::Client(e)) => return Err(friendly(e)),
            }
        }
        Commands::Status { order_id, watch } => {
            navigator.set_current(routes::order_status(&order_id));
            if watch {
                watch_status(ctx, &order_id).await?;
            } else {
                let order = ctx.api().order_status(&order_id).await.map_err(friendly)?;
                print_order(&order);
            }
        }
        Commands::Orders { watch } => {
            navigator.set_current(routes::CUSTOMER_ORDERS);
            let Some(mut poller) = ctx.watch_table_orders().await else {
                bail!("Silakan scan QR code meja terlebih dahulu");
            };
            loop {
                let Some(snapshot) = poller.changed().await else {
                    break;
                };
                if let Some(error) = snapshot.error {
                    eprintln!("Gagal memuat pesanan: {error}");
                }
                for order in snapshot.data.unwrap_or_default() {
                    print_order_row(&order);
                }
                if !watch {
                    break;
                }
                println!("---");
            }
            poller.stop().await;
        }
        Commands::Admin(cmd) => admin(ctx, navigator, cmd).await?,
    }
    Ok(())
}

async fn cart(ctx: &AppContext, cmd: CartCommands) -> Result<()> {
    match cmd {
        CartCommands::Show => {}
        CartCommands::Add {
            menu_id,
            quantity,
            note,
        } => {
            let menu = ctx
                .add_to_cart(&menu_id, quantity, note)
                .await
                .map_err(friendly)?;
            println!("{} ditambahkan ke keranjang", menu.name);
        }
        CartCommands::Remove { menu_id } => ctx.cart().write().await.remove_item(&menu_id),
        CartCommands::Qty { menu_id, quantity } => {
            ctx.cart().write().await.update_quantity(&menu_id, quantity)
        }
        CartCommands::Note { menu_id, note } => {
            ctx.cart().write().await.update_notes(&menu_id, note)
        }
        CartCommands::Clear => ctx.cart().write().await.clear(),
    }

    let cart = ctx.cart().read().await;
    match cart.table_id() {
        Some(table_id) => println!("Meja: {table_id}"),
        None => println!("Meja: -"),
    }
    if cart.is_empty() {
        println!("Keranjang kosong");
        return Ok(());
    }
    for line in cart.items() {
        println!(
            "{:>3} x {:<28} {:>14}",
            line.quantity,
            line.menu.name,
            format_price(line.subtotal())
        );
        if let Some(notes) = &line.notes {
            println!("      catatan: {notes}");
        }
    }
    println!(
        "{} item, total {}",
        cart.item_count(),
        format_price(cart.total())
    );
    Ok(())
}

async fn admin(ctx: &AppContext, navigator: &HistoryNavigator, cmd: AdminCommands) -> Result<()> {
    navigator.set_current("/admin");
    require_staff(ctx).await?;

    match cmd {
        AdminCommands::Orders {
            status,
            page,
            watch,
        } => {
            let query = OrderListQuery {
                page: PageQuery {
                    page,
                    ..Default::default()
                },
                status,
            };
            if watch {
                let mut poller = ctx.watch_orders(query);
                while let Some(snapshot) = poller.changed().await {
                    if let Some(error) = snapshot.error {
                        eprintln!("Gagal memuat pesanan: {error}");
                    }
                    for order in snapshot.data.unwrap_or_default() {
                        print_order_row(&order);
                    }
                    println!("---");
                }
            } else {
                let orders = ctx.api().orders(&query).await.map_err(friendly)?;
                for order in &orders.data {
                    print_order_row(order);
                }
                let p = &orders.pagination;
                println!("Halaman {}/{} ({} pesanan)", p.page, p.total_pages, p.total);
            }
        }
        AdminCommands::Status { order_id, status } => {
            ctx.api()
                .update_order_status(&order_id, status)
                .await
                .map_err(friendly)?;
            println!("Status {order_id}: {}", status_label(status));
        }
        AdminCommands::Tables { page } => {
            let tables = ctx
                .api()
                .tables(PageQuery {
                    page,
                    ..Default::default()
                })
                .await
                .map_err(friendly)?;
            for table in tables.data {
                println!("Meja {:<4} {:<24} {:?}", table.table_number, table.id, table.status);
            }
        }
        AdminCommands::Qr { table_id, out } => {
            let png = ctx.api().table_qr_code(&table_id).await.map_err(friendly)?;
            let path = out.unwrap_or_else(|| PathBuf::from(format!("meja-{table_id}.png")));
            std::fs::write(&path, png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("QR code disimpan di {}", path.display());
        }
        AdminCommands::Report { date } => {
            let report = ctx.api().daily_sales(date).await.map_err(friendly)?;
            println!("Laporan {}", report.date);
            println!("Pesanan:    {}", report.total_orders);
            println!("Pendapatan: {}", format_price(report.total_revenue));
            let mut by_status: Vec<_> = report.orders_by_status.into_iter().collect();
            by_status.sort();
            for (status, count) in by_status {
                let label = status
                    .parse::<OrderStatus>()
                    .map(|s| s.label().to_string())
                    .unwrap_or(status);
                println!("  {label:<22} {count}");
            }
        }
    }
    Ok(())
}

/// Gate back-office commands behind the staff route guard
async fn require_staff(ctx: &AppContext) -> Result<()> {
    match ctx.guard(&RouteGuard::admin()).await {
        GuardDecision::Render => Ok(()),
        GuardDecision::RedirectToUnauthorized => bail!("Akses ditolak untuk peran ini"),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::Loading => {
            bail!("Silakan login terlebih dahulu: pesanin login")
        }
    }
}

async fn watch_status(ctx: &AppContext, order_id: &str) -> Result<()> {
    let mut poller = ctx.watch_order(order_id);
    let mut last_status = None;
    loop {
        tokio::select! {
            snapshot = poller.changed() => {
                let Some(snapshot) = snapshot else { break };
                if let Some(error) = &snapshot.error {
                    eprintln!("Gagal memuat status: {error}");
                }
                let Some(order) = snapshot.data else { continue };
                if last_status != Some(order.status) {
                    last_status = Some(order.status);
                    println!("[{}] {}", format_time(order.updated_at), status_label(order.status));
                }
                if order.status.is_final() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    poller.stop().await;
    Ok(())
}

fn print_order(order: &Order) {
    let table = order
        .table
        .as_ref()
        .map(|t| t.table_number.to_string())
        .unwrap_or_else(|| order.table_id.clone());
    println!(
        "Pesanan {} - meja {} - {} {}",
        order.id,
        table,
        format_date(order.created_at),
        format_time(order.created_at)
    );
    for item in &order.order_items {
        let name = item.menu.as_ref().map_or(item.menu_id.as_str(), |m| m.name.as_str());
        println!("{:>3} x {:<28} {:>14}", item.quantity, name, format_price(item.subtotal));
    }
    if !order.notes.is_empty() {
        println!("Catatan: {}", order.notes);
    }
    println!("Total:  {}", format_price(order.total));
    println!("Status: {}", status_label(order.status));
}

fn print_order_row(order: &Order) {
    println!(
        "{:<24} {:>5} {:>14}  {}",
        order.id,
        format_time(order.created_at),
        format_price(order.total),
        status_label(order.status)
    );
}

fn friendly(e: ClientError) -> anyhow::Error {
    anyhow::anyhow!(e.user_message())
}
