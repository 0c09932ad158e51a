use anyhow::{Context, Result};
use hacker_agent_interfaces::render::table;
use hacker_agent_interfaces::Interface;
use hacker_agent_memory::{LlmProfile, ProfileStore};

/// Picks the LLM profile for this session, creating one when none exist.
pub async fn select_profile<I: Interface + ?Sized>(
    store: &ProfileStore,
    requested: Option<&str>,
    interface: &I,
) -> Result<LlmProfile> {
    if let Some(name) = requested {
        return store
            .find(name)
            .await
            .with_context(|| format!("No LLM profile named {:?}", name));
    }

    let profiles = store.list().await;
    match profiles.len() {
        0 => {
            let profile = create_profile(interface).await?;
            store
                .add(profile.clone())
                .await
                .context("Failed to save LLM profile")?;
            Ok(profile)
        }
        1 => Ok(profiles[0].clone()),
        _ => choose_profile(&profiles, interface).await,
    }
}

pub async fn create_profile<I: Interface + ?Sized>(interface: &I) -> Result<LlmProfile> {
    interface
        .send_output("\nNo LLM configurations found. Let's set one up!")
        .await;

    let name = ask(interface, "Enter a name for this configuration (e.g., 'My Ollama'): ").await?;
    let url = ask(
        interface,
        "Enter the API base URL (e.g., 'http://localhost:11434/v1'): ",
    )
    .await?;

    interface
        .send_output("Enter the API key (leave blank if not needed):")
        .await;
    let api_key = tokio::task::spawn_blocking(rpassword::read_password)
        .await?
        .context("Failed to read API key")?;

    let model = ask(interface, "Enter the model name (e.g., 'qwen3:235b'): ").await?;

    let profile = profile_from_answers(&name, &url, &api_key, &model)?;
    interface
        .send_output(&format!("✅ Profile '{}' configured", profile.name))
        .await;
    Ok(profile)
}

pub fn profile_from_answers(
    name: &str,
    url: &str,
    api_key: &str,
    model: &str,
) -> Result<LlmProfile> {
    let api_key = Some(api_key.trim().to_string());
    let profile = LlmProfile::new(name.trim(), url.trim(), api_key, model.trim());
    profile.validate()?;
    Ok(profile)
}

pub async fn choose_profile<I: Interface + ?Sized>(
    profiles: &[LlmProfile],
    interface: &I,
) -> Result<LlmProfile> {
    interface.send_output("\nAvailable LLM Configurations").await;
    interface.send_output(&profile_table(profiles)).await;

    let label = format!(
        "Choose a configuration to use for this session [1-{}]: ",
        profiles.len()
    );
    loop {
        let answer = interface
            .prompt(&label)
            .await
            .context("No LLM configuration selected")?;
        match parse_choice(&answer, profiles.len()) {
            Some(index) => return Ok(profiles[index].clone()),
            None => {
                interface
                    .show_error(&format!(
                        "Please enter a number between 1 and {}",
                        profiles.len()
                    ))
                    .await
            }
        }
    }
}

/// 1-based menu choice to a 0-based index.
pub fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let choice: usize = answer.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

pub fn profile_table(profiles: &[LlmProfile]) -> String {
    let rows: Vec<Vec<String>> = profiles
        .iter()
        .enumerate()
        .map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                p.name.clone(),
                p.url.clone(),
                p.model_name.clone(),
                p.masked_api_key(),
            ]
        })
        .collect();
    table(&["Index", "Name", "URL", "Model", "API Key"], &rows)
}

async fn ask<I: Interface + ?Sized>(interface: &I, label: &str) -> Result<String> {
    interface
        .prompt(label)
        .await
        .context("Input closed during setup")
}
