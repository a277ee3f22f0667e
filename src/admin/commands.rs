use crate::entities::costume::DEFAULT_SCALE;
use crate::entities::player::{MapKind, PlayerId};

#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    Login {
        player: PlayerId,
        display_id: u32,
        scale: f32,
    },
    Logout {
        player: PlayerId,
    },
    Use {
        player: PlayerId,
        item: u32,
        spell: Option<u32>,
    },
    Combat {
        player: PlayerId,
        engaged: bool,
    },
    Map {
        player: PlayerId,
        map: MapKind,
    },
    Tick {
        diff: u32,
    },
    Reload,
    Status,
    Shutdown,
    Unknown(String),
}

pub fn parse_admin_command(message: &str) -> Result<Option<AdminCommand>, String> {
    let trimmed = message.trim();
    if !trimmed.starts_with('!') {
        return Ok(None);
    }

    let mut parts = trimmed[1..].split_whitespace();
    let command = parts
        .next()
        .ok_or_else(|| "admin command missing name".to_string())?;
    let command = command.to_ascii_lowercase();
    let parsed = match command.as_str() {
        "login" => {
            let player = parse_player(parts.next())?;
            let display_id = parse_u32(parts.next(), "display id")?;
            let scale = match parts.next() {
                Some(value) => value
                    .parse::<f32>()
                    .map_err(|_| format!("admin command expected scale, got '{value}'"))?,
                None => DEFAULT_SCALE,
            };
            AdminCommand::Login {
                player,
                display_id,
                scale,
            }
        }
        "logout" => AdminCommand::Logout {
            player: parse_player(parts.next())?,
        },
        "use" => {
            let player = parse_player(parts.next())?;
            let item = parse_u32(parts.next(), "item id")?;
            let spell = match parts.next() {
                Some(value) => Some(parse_u32(Some(value), "spell id")?),
                None => None,
            };
            AdminCommand::Use {
                player,
                item,
                spell,
            }
        }
        "combat" => {
            let player = parse_player(parts.next())?;
            let engaged = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                None | Some("on") => true,
                Some("off") => false,
                Some(other) => {
                    return Err(format!("admin command expected on/off, got '{other}'"));
                }
            };
            AdminCommand::Combat { player, engaged }
        }
        "map" => {
            let player = parse_player(parts.next())?;
            let map = match parts.next() {
                Some(value) => MapKind::parse(value)
                    .ok_or_else(|| format!("admin command unknown map '{value}'"))?,
                None => MapKind::World,
            };
            AdminCommand::Map { player, map }
        }
        "tick" => AdminCommand::Tick {
            diff: parse_u32(parts.next(), "tick length")?,
        },
        "reload" => AdminCommand::Reload,
        "status" => AdminCommand::Status,
        "shutdown" => AdminCommand::Shutdown,
        _ => AdminCommand::Unknown(command),
    };
    Ok(Some(parsed))
}

fn parse_player(value: Option<&str>) -> Result<PlayerId, String> {
    parse_u32(value, "player id").map(PlayerId)
}

fn parse_u32(value: Option<&str>, what: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("admin command missing {what}"))?;
    value
        .parse::<u32>()
        .map_err(|_| format!("admin command expected {what}, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_admin_command_ignores_non_command() {
        assert_eq!(parse_admin_command("hello").unwrap(), None);
        assert_eq!(parse_admin_command("# note").unwrap(), None);
    }

    #[test]
    fn parse_admin_command_parses_login_with_default_scale() {
        assert_eq!(
            parse_admin_command("!login 1 49").unwrap(),
            Some(AdminCommand::Login {
                player: PlayerId(1),
                display_id: 49,
                scale: 1.0,
            })
        );
        assert_eq!(
            parse_admin_command("!LOGIN 2 50 1.5").unwrap(),
            Some(AdminCommand::Login {
                player: PlayerId(2),
                display_id: 50,
                scale: 1.5,
            })
        );
    }

    #[test]
    fn parse_admin_command_parses_use() {
        assert_eq!(
            parse_admin_command("!use 1 5").unwrap(),
            Some(AdminCommand::Use {
                player: PlayerId(1),
                item: 5,
                spell: None,
            })
        );
        assert_eq!(
            parse_admin_command("!use 1 5 99").unwrap(),
            Some(AdminCommand::Use {
                player: PlayerId(1),
                item: 5,
                spell: Some(99),
            })
        );
    }

    #[test]
    fn parse_admin_command_parses_context_changes() {
        assert_eq!(
            parse_admin_command("!combat 1 off").unwrap(),
            Some(AdminCommand::Combat {
                player: PlayerId(1),
                engaged: false,
            })
        );
        assert_eq!(
            parse_admin_command("!map 1 bg").unwrap(),
            Some(AdminCommand::Map {
                player: PlayerId(1),
                map: MapKind::Battleground,
            })
        );
        assert!(parse_admin_command("!map 1 moon").is_err());
        assert!(parse_admin_command("!combat 1 maybe").is_err());
    }

    #[test]
    fn parse_admin_command_requires_arguments() {
        assert!(parse_admin_command("!tick").is_err());
        assert!(parse_admin_command("!use 1").is_err());
        assert!(parse_admin_command("!login x 49").is_err());
        assert!(parse_admin_command("!").is_err());
    }

    #[test]
    fn parse_admin_command_keeps_unknown_name() {
        assert_eq!(
            parse_admin_command("!dance").unwrap(),
            Some(AdminCommand::Unknown("dance".to_string()))
        );
    }
}
