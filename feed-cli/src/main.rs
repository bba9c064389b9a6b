use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use feed_client::{FeedClient, FeedClientError, Post, PostsPage};

const USERNAME_FILE: &str = ".feed_username";
const DEFAULT_SERVER: &str = "https://dev.codeleap.co.uk/careers";

#[derive(Debug, Parser)]
#[command(name = "feed-cli", version, about = "CLI клиент ленты CodeLeap Network")]
struct Cli {
    /// Базовый URL коллекции постов (по умолчанию FEED_API_URL или публичный
    /// endpoint).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Выбор имени пользователя (сохраняется в .feed_username).
    Signup {
        #[arg(long)]
        username: String,
    },
    /// Сброс сохранённого имени пользователя.
    Logout,
    /// Текущее имя пользователя.
    Whoami,
    /// Создание поста (требует signup).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Обновление поста по id.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Удаление поста по id.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Список постов.
    List,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let client = FeedClient::new(server);

    match cli.command {
        Command::Signup { username } => {
            let username = username.trim().to_string();
            if username.is_empty() {
                return Err(anyhow!("имя пользователя не может быть пустым"));
            }
            persist_username(&username).context("не удалось сохранить .feed_username")?;
            println!("Имя пользователя сохранено: {username}");
        }
        Command::Logout => {
            clear_username().context("не удалось удалить .feed_username")?;
            println!("Имя пользователя сброшено");
        }
        Command::Whoami => match load_username().context("не удалось прочитать .feed_username")? {
            Some(username) => println!("{username}"),
            None => println!("имя пользователя не задано, выполните `feed-cli signup ...`"),
        },
        Command::Create { title, content } => {
            let username = require_username()?;
            let post = client
                .create_post(&username, &title, &content)
                .await
                .map_err(map_client_error)?;
            print_post("Пост создан", &post);
        }
        Command::Update { id, title, content } => {
            let post = client
                .update_post(id, &title, &content)
                .await
                .map_err(map_client_error)?;
            print_post("Пост обновлён", &post);
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        Command::List => {
            let page = client.list_posts().await.map_err(map_client_error)?;
            let current = load_username()
                .context("не удалось прочитать .feed_username")?
                .unwrap_or_default();
            print_list(&page, &current);
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server
        .or_else(|| std::env::var("FEED_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("https://{server}")
}

fn parse_username_content(raw: &str) -> Option<String> {
    let username = raw.trim().to_string();
    if username.is_empty() {
        return None;
    }
    Some(username)
}

fn load_username() -> io::Result<Option<String>> {
    if !Path::new(USERNAME_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(USERNAME_FILE)?;
    Ok(parse_username_content(&raw))
}

fn persist_username(username: &str) -> io::Result<()> {
    fs::write(USERNAME_FILE, username)
}

fn clear_username() -> io::Result<()> {
    if Path::new(USERNAME_FILE).exists() {
        fs::remove_file(USERNAME_FILE)?;
    }
    Ok(())
}

fn require_username() -> Result<String> {
    load_username()
        .context("не удалось прочитать .feed_username")?
        .ok_or_else(|| anyhow!("имя пользователя не задано, выполните `feed-cli signup ...`"))
}

fn map_client_error(err: FeedClientError) -> anyhow::Error {
    let message = match err {
        FeedClientError::NotFound => "пост не найден".to_string(),
        FeedClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        FeedClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("username: {}", post.username);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("created_datetime: {}", post.created_datetime);
}

fn print_list(page: &PostsPage, current_username: &str) {
    println!("Постов: {} (всего в коллекции: {})", page.results.len(), page.count);
    for post in &page.results {
        let marker = if !current_username.is_empty()
            && post.username.trim().to_lowercase() == current_username.trim().to_lowercase()
        {
            " (ваш)"
        } else {
            ""
        };
        println!(
            "- [{}] {} — @{}{} ({})",
            post.id, post.title, post.username, marker, post.created_datetime
        );
    }
}
