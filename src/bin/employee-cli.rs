use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8111")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Find employees whose name contains TERM
    Search { term: String },
    /// Show one employee
    Get { id: String },
    /// Show the highest salary
    HighestSalary,
    /// Show the ten best paid employees
    TopTen,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: Option<i64>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match cli.command {
        Commands::List => client.get(endpoint(&base, &[])?),
        Commands::Search { term } => client.get(endpoint(&base, &["search", term.as_str()])?),
        Commands::Get { id } => client.get(endpoint(&base, &[id.as_str()])?),
        Commands::HighestSalary => client.get(endpoint(&base, &["highestSalary"])?),
        Commands::TopTen => {
            client.get(endpoint(&base, &["topTenHighestEarningEmployeeNames"])?)
        }
        Commands::Create { name, salary, age, title } => {
            let mut body = json!({ "name": name });
            if let Some(salary) = salary {
                body["salary"] = json!(salary);
            }
            if let Some(age) = age {
                body["age"] = json!(age);
            }
            if let Some(title) = title {
                body["title"] = json!(title);
            }
            client.post(endpoint(&base, &[])?).json(&body)
        }
        Commands::Delete { id } => client.delete(endpoint(&base, &[])?).query(&[("id", id)]),
    };

    print_response(request.send().await?).await
}

/// Gateway URL for `segments`, each percent-encoded as a single path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("'{}' cannot be used as a base URL", base))?
        .pop_if_empty()
        .extend(segments);
    if segments.is_empty() {
        url.set_path(&format!("{}/", url.path().trim_end_matches('/')));
    }
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
