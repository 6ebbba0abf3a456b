//! Interactive collection of Cloudflare credentials.
//!
//! Delegated hostnames are grouped by nameserver set: Cloudflare assigns each
//! account its own nameserver pair, so one group is (almost always) one
//! account. The user is asked for credentials at most once per group.

use std::io::{BufRead, Write};

use crate::config::CREDENTIAL_PROMPT_PREVIEW;
use crate::models::{Credentials, Delegation, Hostname, NameserverGroup};

const YES_NO: &[&str] = &["y", "Y", "n", "N"];

/// Asks the user a question.
///
/// When `allowed` is given, implementations keep asking until one of the
/// allowed answers is entered. An empty answer means `default`.
pub trait Prompter {
    fn prompt(&mut self, message: &str, default: &str, allowed: Option<&[&str]>) -> String;
}

/// Prompts on stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&mut self, message: &str, default: &str, allowed: Option<&[&str]>) -> String {
        let stdin = std::io::stdin();
        loop {
            print!("{message}");
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // EOF or unreadable stdin: nothing more will come
                Ok(0) | Err(_) => return default.to_string(),
                Ok(_) => {}
            }

            let answer = match line.trim() {
                "" => default.to_string(),
                answer => answer.to_string(),
            };

            match allowed {
                Some(allowed) if !allowed.contains(&answer.as_str()) => continue,
                _ => return answer,
            }
        }
    }
}

fn declined(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("n")
}

/// Groups delegated hostnames by nameserver set.
///
/// Nameserver sets are compared after sorting and de-duplication. Groups and
/// the hostnames inside them keep first-seen order; direct hostnames are
/// ignored.
pub fn group_by_nameservers(hostnames: &[Hostname]) -> Vec<NameserverGroup> {
    let mut groups: Vec<NameserverGroup> = Vec::new();

    for host in hostnames {
        let Delegation::Provider(meta) = &host.delegation else {
            continue;
        };

        let mut nameservers = meta.nameservers.clone();
        nameservers.sort();
        nameservers.dedup();

        match groups.iter_mut().find(|g| g.nameservers == nameservers) {
            Some(group) => {
                if !group.hostnames.contains(&host.name) {
                    group.hostnames.push(host.name.clone());
                }
            }
            None => groups.push(NameserverGroup {
                nameservers,
                hostnames: vec![host.name.clone()],
                credentials: None,
            }),
        }
    }

    groups
}

/// Renders up to `limit` hostnames, comma-joined, with a `+N more` suffix
/// when some were left out.
pub fn domains_preview(domains: &[String], limit: usize) -> String {
    let shown = domains.len().min(limit);
    let mut text = domains[..shown].join(", ");
    let rest = domains.len() - shown;
    if rest > 0 {
        text.push_str(&format!(" +{rest} more"));
    }
    text
}

fn prompt_for_group<P: Prompter + ?Sized>(
    prompter: &mut P,
    group: &NameserverGroup,
) -> Option<Credentials> {
    let answer = prompter.prompt(
        &format!(
            "Would you like to enter credentials for {} (domains: {})? [y/N] ",
            group.nameservers.join(", "),
            domains_preview(&group.hostnames, CREDENTIAL_PROMPT_PREVIEW)
        ),
        "N",
        Some(YES_NO),
    );
    if declined(&answer) {
        return None;
    }

    let email = prompter.prompt("Email: ", "", None);
    let api_key = prompter.prompt("API Token: ", "", None);
    Some(Credentials { email, api_key })
}

/// Asks for credentials per nameserver group and copies them onto the
/// group's hostnames.
///
/// Declining the opening question returns the input untouched without
/// asking anything else. Hostnames that are direct, or whose group was
/// declined, keep no credentials.
pub fn attach_credentials<P: Prompter + ?Sized>(
    prompter: &mut P,
    mut hostnames: Vec<Hostname>,
) -> Vec<Hostname> {
    let mut groups = group_by_nameservers(&hostnames);
    if groups.is_empty() {
        return hostnames;
    }

    let answer = prompter.prompt(
        &format!(
            "Detected {} Cloudflare accounts. Do you want to use the Cloudflare API to check DNS records? [y/N] ",
            groups.len()
        ),
        "N",
        Some(YES_NO),
    );
    if declined(&answer) {
        log::info!("Cloudflare API lookups declined");
        return hostnames;
    }

    for group in &mut groups {
        group.credentials = prompt_for_group(prompter, group);
    }

    for host in &mut hostnames {
        let Delegation::Provider(meta) = &mut host.delegation else {
            continue;
        };
        if let Some(group) = groups.iter().find(|g| g.hostnames.contains(&host.name)) {
            meta.credentials = group.credentials.clone();
        }
    }

    hostnames
}
