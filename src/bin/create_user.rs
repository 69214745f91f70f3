use clap::Parser;
use std::io::{self, Write};

use tweet_gate::{
    args::Args, handlers::admin::hash_password, models::user::UserRecord, user_store::UserStore,
    AppError, Config, StoreError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config).map_err(AppError::Config)?;

    let store = UserStore::load(&config.data.users_path).await?;

    println!("--- Create User Account ---");

    print!("Enter Username: ");
    io::stdout().flush()?;
    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    let username = username.trim();

    print!("Enter Password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim();

    print!("Enter Groups (space-separated, e.g. \"admin\"): ");
    io::stdout().flush()?;
    let mut groups = String::new();
    io::stdin().read_line(&mut groups)?;

    if username.is_empty() || password.is_empty() {
        eprintln!("Error: Username and password cannot be empty.");
        return Ok(());
    }

    println!("Hashing password...");
    let password_hash = hash_password(password)?;

    let record = UserRecord {
        username: username.to_string(),
        groups: groups.split_whitespace().map(str::to_string).collect(),
        disabled: false,
        password: password_hash,
    };

    match store.add(record).await {
        Ok(user) => {
            println!("✅ Success! User created.");
            println!("Username: {}", user.username);
            println!("Groups: {:?}", user.groups);
        }
        Err(StoreError::DuplicateUser(name)) => {
            eprintln!("❌ Error: Username '{}' already exists.", name);
        }
        Err(e) => {
            eprintln!("❌ Store Error: {}", e);
        }
    }

    Ok(())
}
