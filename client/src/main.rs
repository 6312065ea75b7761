use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{
    Args, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tracing_subscriber::EnvFilter;

use blog_client::{
    HttpPostsApi, PostsApi,
    admin::AdminDashboard,
    browse::{CategoryFilter, PostBrowser},
    comments::CommentBook,
    config::ClientConfig,
    form::{PostForm, submit_new_post, submit_post_update},
    gate::AdminGate,
    info, normalize_post, normalize_posts, render,
    share::{post_page_url, share_links},
    storage::LocalStore,
    success, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = "blog",
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List posts, six per page
    List(ListOptions),

    /// Show the category names in use
    Categories,

    /// Show one post with share links and comments
    Show {
        /// Post id
        id: String,
    },

    /// Leave a comment on a post (stored locally only)
    Comment {
        /// Post id
        id: String,
        #[clap(long)]
        name: String,
        #[clap(long)]
        text: String,
    },

    /// Unlock the admin commands
    Login {
        #[clap(long)]
        password: String,
    },

    /// Lock the admin commands again
    Logout,

    /// Manage posts (requires `blog login`)
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct ListOptions {
    /// Case-insensitive title search
    #[clap(long, default_value = "")]
    search: String,

    /// Exact category name, or "All"
    #[clap(long, default_value = "All")]
    category: String,

    /// Page number, starting at 1
    #[clap(long, default_value_t = 1)]
    page: usize,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Table of all posts
    List,

    /// Create a post
    Add(PostFields),

    /// Edit a post; omitted fields keep their current value
    Edit {
        /// Post id
        id: String,
        #[clap(flatten)]
        fields: PostFields,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: String,
        /// Do not ask for confirmation
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct PostFields {
    /// English title
    #[clap(long)]
    title: Option<String>,
    #[clap(long)]
    excerpt: Option<String>,
    /// Post body; markup is kept as-is
    #[clap(long)]
    content: Option<String>,
    /// Comma-separated category names
    #[clap(long)]
    categories: Option<String>,
    #[clap(long)]
    image_url: Option<String>,
    /// YYYY-MM-DD
    #[clap(long)]
    publish_date: Option<String>,
    #[clap(long)]
    video_url: Option<String>,
    /// Author name
    #[clap(long)]
    author: Option<String>,
}

impl PostFields {
    fn apply(self, form: &mut PostForm) {
        let set = |target: &mut String, value: Option<String>| {
            if let Some(v) = value {
                *target = v;
            }
        };
        set(&mut form.title_en, self.title);
        set(&mut form.excerpt, self.excerpt);
        set(&mut form.content, self.content);
        set(&mut form.categories, self.categories);
        set(&mut form.image_url, self.image_url);
        set(&mut form.publish_date, self.publish_date);
        set(&mut form.video_url, self.video_url);
        if let Some(name) = self.author {
            form.author = Some(serde_json::Value::String(name));
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    let api = HttpPostsApi::new(config.api_url.clone())?;
    let store = LocalStore::new(&config.home);
    let gate = AdminGate::new(store.clone());

    match cli.command {
        Command::List(opts) => {
            let raw = api.list_posts().await?;
            let mut browser = PostBrowser::new(normalize_posts(&raw));
            browser.set_search(opts.search);
            browser.set_category(CategoryFilter::parse(&opts.category));
            browser.go_to(opts.page);
            println!("{}", render::post_page(&browser));
        }
        Command::Categories => {
            let raw = api.list_posts().await?;
            let browser = PostBrowser::new(normalize_posts(&raw));
            for name in browser.categories() {
                println!("{name}");
            }
        }
        Command::Show { id } => {
            // Ctrl-C abandons the in-flight request.
            let raw = tokio::select! {
                res = api.get_post(&id) => res?,
                _ = tokio::signal::ctrl_c() => {
                    warning!("Cancelled");
                    return Ok(());
                }
            };
            let Some(post) = normalize_post(&raw) else {
                warning!("Post not available");
                return Ok(());
            };
            let links = share_links(&post_page_url(&config.page_url, &post.id), &post.title);
            let book = CommentBook::load(store.clone(), &post.id).await?;
            println!("{}", render::post_detail(&post, &links, book.comments()));
        }
        Command::Comment { id, name, text } => {
            let mut book = CommentBook::load(store.clone(), &id).await?;
            if book.add(&name, &text).await? {
                success!("Comment saved");
            } else {
                warning!("Name and comment text are both required");
            }
        }
        Command::Login { password } => match gate.login(&password).await {
            Ok(()) => success!("Logged in as admin"),
            Err(e) => warning!("{e}"),
        },
        Command::Logout => {
            gate.logout().await?;
            success!("Logged out");
        }
        Command::Admin(cmd) => {
            if let Err(e) = gate.require_admin().await {
                warning!("{e}");
                return Ok(());
            }
            run_admin(&api, cmd).await?;
        }
    }

    Ok(())
}

async fn run_admin(api: &HttpPostsApi, cmd: AdminCommand) -> Result<()> {
    match cmd {
        AdminCommand::List => {
            let dashboard = AdminDashboard::load(api).await?;
            println!("{}", render::admin_table(dashboard.posts()));
        }
        AdminCommand::Add(fields) => {
            let mut form = PostForm::default();
            fields.apply(&mut form);
            match submit_new_post(api, form).await {
                Ok(created) => success!(
                    "Post created ({})",
                    created["id"].as_str().unwrap_or("unknown id")
                ),
                Err(e @ blog_client::ClientError::Validation(_)) => warning!("{e}"),
                Err(e) => warning!("AddPost Error: {e}"),
            }
        }
        AdminCommand::Edit { id, fields } => {
            let current = match api.get_post(&id).await {
                Ok(doc) => doc,
                Err(e) => {
                    warning!("Failed to fetch post: {e}");
                    return Ok(());
                }
            };
            let mut form = PostForm::from_document(&current);
            fields.apply(&mut form);
            match submit_post_update(api, &id, form).await {
                Ok(_) => success!("Post updated"),
                Err(e @ blog_client::ClientError::Validation(_)) => warning!("{e}"),
                Err(e) => warning!("EditPost Error: {e}"),
            }
        }
        AdminCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this post?")? {
                info!("Nothing deleted");
                return Ok(());
            }
            let mut dashboard = AdminDashboard::load(api).await?;
            match dashboard.delete_post(api, &id).await {
                Ok(()) => success!("Post deleted"),
                Err(e) => warning!("Failed to delete post: {e}"),
            }
            println!("{}", render::admin_table(dashboard.posts()));
        }
    }
    Ok(())
}
