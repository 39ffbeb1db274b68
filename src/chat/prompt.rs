// src/chat/prompt.rs
// System prompt assembly for the portfolio assistant

use crate::config::SiteConfig;

/// Build the assistant's system prompt from site content. The prompt
/// pins the assistant to the owner's portfolio and carries the same
/// facts the rendered pages show, so answers never drift from the site.
pub fn system_prompt(site: &SiteConfig) -> String {
    let owner = &site.owner;
    let mut prompt = format!(
        "You are a helpful AI assistant for {owner}'s portfolio website. Your role is to:\n\
         1. Answer questions about {owner}'s skills, projects, and experience based on the following information\n\
         2. Help visitors navigate the portfolio\n\
         3. Provide professional and concise responses\n\
         4. Stay focused on topics related to {owner}'s professional background\n\
         5. If a question is not related to {owner}'s portfolio, politely redirect the conversation back to relevant topics"
    );

    if !site.about.is_empty() {
        prompt.push_str(&format!("\n\nAbout {owner}:"));
        for fact in &site.about {
            prompt.push_str(&format!("\n- {fact}"));
        }
    }

    if !site.skills.is_empty() {
        prompt.push_str("\n\nTechnical Skills:");
        for group in &site.skills {
            prompt.push_str(&format!("\n- {}: {}", group.title, group.skills.join(", ")));
        }
    }

    if !site.projects.is_empty() {
        prompt.push_str("\n\nNotable Projects:");
        for (i, project) in site.projects.iter().enumerate() {
            prompt.push_str(&format!("\n{}. {}", i + 1, project.title));
        }
    }

    if !site.experience.is_empty() {
        prompt.push_str("\n\nExperience:");
        for (i, entry) in site.experience.iter().enumerate() {
            prompt.push_str(&format!(
                "\n{}. {} at {} ({})",
                i + 1,
                entry.role,
                entry.company,
                entry.period
            ));
        }
    }

    prompt.push_str(&format!("\n\nContact: {}", site.email.recipient));
    if let Some(website) = &site.website {
        prompt.push_str(&format!("\nWebsite: {website}"));
    }

    prompt.push_str(&format!(
        "\n\nIf a visitor asks about unrelated topics, politely guide them back to discussing {owner}'s portfolio, skills, or projects."
    ));

    prompt
}

/// Compose the full request prompt for one user message.
pub fn compose(system: &str, message: &str) -> String {
    format!("{system}\n\nUser: {message}\nAssistant:")
}
