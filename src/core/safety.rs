// basic command safety checks
// catches obvious dangerous stuff but not everything

pub struct Safety {
    pub is_dangerous: bool,
    pub reason: String,
    pub warning: Option<String>,
}

impl Safety {
    pub fn check(command: &str) -> Self {
        let trimmed = command.trim();
        let lower = trimmed.to_lowercase();

        // these are almost always bad news
        let dangerous = [
            ("rm -rf", "recursive force remove"),
            ("rm -fr", "recursive force remove"),
            ("sudo ", "privilege escalation"),
            ("doas ", "privilege escalation"),
            (":(){", "fork bomb"),
            ("mkfs", "formats a filesystem"),
            ("> /dev/", "writes to a device node"),
            ("of=/dev/", "writes to a device node"),
        ];

        for (pattern, reason) in dangerous {
            if lower.contains(pattern) {
                return Self {
                    is_dangerous: true,
                    reason: reason.to_string(),
                    warning: None,
                };
            }
        }

        // fetching a script and piping it straight into a shell
        if lower.contains("curl") || lower.contains("wget") {
            for pipe in ["| sh", "|sh", "| bash", "|bash", "| zsh", "|zsh"] {
                if lower.contains(pipe) {
                    return Self {
                        is_dangerous: true,
                        reason: "pipes a downloaded script into a shell".to_string(),
                        warning: None,
                    };
                }
            }
        }

        // command substitution can smuggle in anything
        if trimmed.contains('`') || trimmed.contains("$(") {
            return Self {
                is_dangerous: true,
                reason: "command substitution".to_string(),
                warning: None,
            };
        }

        // redirecting into an absolute path leaves the project directory
        if lower.contains("> /") {
            return Self {
                is_dangerous: true,
                reason: "redirects output outside the project".to_string(),
                warning: None,
            };
        }

        // not dangerous but worth mentioning
        let installs = ["npm install", "npm ci", "npm i ", "yarn", "pnpm", "pip install"];
        let warning = if installs.iter().any(|p| lower.contains(p)) {
            Some("installs packages from the network".to_string())
        } else if lower.contains("npx ") {
            Some("downloads and runs a package".to_string())
        } else if lower.contains("curl") || lower.contains("wget") || lower.contains("git clone") {
            Some("fetches from the network".to_string())
        } else {
            None
        };

        Self {
            is_dangerous: false,
            reason: String::new(),
            warning,
        }
    }
}
