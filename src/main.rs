use std::path::PathBuf;
use std::process::ExitCode;

use blogdesk::config::AppConfig;
use blogdesk::error::{ErrorCode, error_json};
use blogdesk::routes::{self, ADMIN_PATH, ADMIN_POST_NEW_PATH, ADMIN_POSTS_PATH, breadcrumbs::breadcrumbs};
use blogdesk::services::dashboard::dashboard_stats;
use blogdesk::services::forms::{FieldErrors, LoginForm, PostEdits, PostForm, RegisterForm};
use blogdesk::services::posts::{PostError, PostId};
use blogdesk::services::session::SessionError;
use blogdesk::state::AppState;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("access denied; redirect to {target}")]
    AccessDenied { target: &'static str },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Session(e) => e.error_code(),
            Self::Post(e) => e.error_code(),
            Self::Invalid(_) => "E_INVALID_INPUT",
            Self::AccessDenied { .. } => "E_ACCESS_DENIED",
            Self::Json(_) => "E_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "blogdesk", about = "Blog session and content CLI")]
struct Cli {
    #[arg(long, env = "BLOGDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Skip simulated network delays")]
    no_latency: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, help = "Path the login redirect carried, if any")]
        from: Option<String>,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    Whoami,
    Visit {
        path: String,
    },
    Breadcrumbs {
        path: String,
    },
    Posts(PostsCommand),
    Categories,
    Dashboard,
}

#[derive(Args, Debug)]
struct PostsCommand {
    #[command(subcommand)]
    command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PostsSubcommand {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        slug: String,
    },
    Get {
        id: String,
    },
    Create(PostFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PatchFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct PostFields {
    #[arg(long)]
    title: String,
    #[arg(long)]
    excerpt: String,
    #[arg(long)]
    content: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    image: String,
    #[arg(long, default_value = "", help = "Comma-separated tags")]
    tags: String,
}

#[derive(Args, Debug, Default)]
struct PatchFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    excerpt: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long, help = "Comma-separated tags")]
    tags: Option<String>,
}

impl From<PatchFields> for PostEdits {
    fn from(fields: PatchFields) -> Self {
        Self {
            title: fields.title,
            excerpt: fields.excerpt,
            content: fields.content,
            category: fields.category,
            image: fields.image,
            tags: fields.tags,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    if cli.no_latency {
        config = config.without_latency();
    }
    let state = AppState::from_config(&config);

    match run(&state, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_json(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password, from } => run_login(state, email, password, from).await,
        Command::Register { name, email, password, confirm_password } => {
            let form = RegisterForm { name, email, password, confirm_password };
            reject_invalid(&form.validate())?;
            let user = state.session.register(&form.email, &form.password, &form.name).await?;
            print_json(&serde_json::json!({ "user": user, "redirect": routes::HOME_PATH }))
        }
        Command::Logout => {
            state.session.logout();
            print_json(&serde_json::json!({ "authenticated": false }))
        }
        Command::Whoami => print_json(&serde_json::json!({
            "authenticated": state.session.is_authenticated(),
            "admin": state.session.is_admin(),
            "user": state.session.current_user(),
        })),
        Command::Visit { path } => print_json(&routes::navigate(&state.session, &path)),
        Command::Breadcrumbs { path } => print_json(&breadcrumbs(&path)),
        Command::Posts(posts) => run_posts(state, posts).await,
        Command::Categories => print_json(&state.posts.list_categories().await),
        Command::Dashboard => {
            require(state, ADMIN_PATH)?;
            print_json(&dashboard_stats(&state.posts).await)
        }
    }
}

async fn run_login(state: &AppState, email: String, password: String, from: Option<String>) -> Result<(), CliError> {
    let form = LoginForm { email, password };
    reject_invalid(&form.validate())?;
    let user = state.session.login(&form.email, &form.password).await?;
    let redirect = routes::login_destination(from.as_deref(), &state.session);
    print_json(&serde_json::json!({ "user": user, "redirect": redirect }))
}

async fn run_posts(state: &AppState, posts: PostsCommand) -> Result<(), CliError> {
    let repo = &state.posts;
    match posts.command {
        PostsSubcommand::List { category, search } => {
            print_json(&repo.list_posts(category.as_deref(), search.as_deref()).await)
        }
        PostsSubcommand::Show { slug } => print_json(&repo.get_post_by_slug(&slug).await?),
        PostsSubcommand::Get { id } => {
            let id: PostId = id.parse()?;
            print_json(&repo.get_post_by_id(id).await?)
        }
        PostsSubcommand::Create(fields) => {
            require(state, ADMIN_POST_NEW_PATH)?;
            let form = PostForm {
                title: fields.title,
                excerpt: fields.excerpt,
                content: fields.content,
                category: fields.category,
                image: fields.image,
                tags: fields.tags,
            };
            reject_invalid(&form.validate())?;
            let author = state.session.current_user().map(|u| u.name);
            print_json(&repo.create_post(form.into_new_post(author.as_deref())).await)
        }
        PostsSubcommand::Update { id, fields } => {
            require(state, ADMIN_POSTS_PATH)?;
            let id: PostId = id.parse()?;
            let current = repo.get_post_by_id(id).await?;
            let patch = PostForm::edit(&current, fields.into()).map_err(|errors| invalid(&errors))?;
            print_json(&repo.update_post(id, patch).await?)
        }
        PostsSubcommand::Delete { id } => {
            require(state, ADMIN_POSTS_PATH)?;
            let id: PostId = id.parse()?;
            repo.delete_post(id).await?;
            print_json(&serde_json::json!({ "success": true }))
        }
    }
}

/// Run the guard for an admin view and refuse unless it allows access.
fn require(state: &AppState, path: &str) -> Result<(), CliError> {
    let navigation = routes::navigate(&state.session, path);
    match navigation.access.redirect_target() {
        None => Ok(()),
        Some(target) => Err(CliError::AccessDenied { target }),
    }
}

fn reject_invalid(errors: &FieldErrors) -> Result<(), CliError> {
    if errors.is_empty() { Ok(()) } else { Err(invalid(errors)) }
}

fn invalid(errors: &FieldErrors) -> CliError {
    match serde_json::to_string(errors) {
        Ok(rendered) => CliError::Invalid(rendered),
        Err(e) => CliError::Json(e),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
