use std::path::PathBuf;

use publisher_core::{ArticleStatus, Msg, NewProfile, TaxonomyKind};

use crate::cli::ScopeArg;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Show,
    Quit,
    Send(Msg),
    /// Applies to the article shown at a 1-based position.
    Article { position: usize, action: ArticleAction },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ArticleAction {
    Toggle,
    Status(ArticleStatus),
    Image(PathBuf),
    ClearImage,
    Taxonomy(TaxonomyKind),
}

pub(crate) const HELP: &str = "\
profiles                          reload profiles, folder and files
use <name>                        select a profile (no name clears it)
add-profile <name> <url> <user> <password>
remove-profile <name>             delete a profile
test <name>                       test a profile's connection
dir [path]                        show or change the article folder
refresh                           re-read the article folder
select <n>|all|none               toggle an article or (de)select all
status <n> draft|publish          set an article's publish status
image <n> <file>                  attach a featured image
no-image <n>                      drop the featured image
categories [n] / tags [n]         open the dialog (global, or for article n)
search <text>                     filter the open dialog
check <id>                        toggle an entry in the open dialog
check-all / uncheck-all           (de)select entries in the open dialog
new <name>                        create an entry of the dialog's kind
ok / cancel                       accept or discard the dialog
scope all|visible                 what check-all affects
publish / stop                    start or cancel a batch
show / help / quit";

pub(crate) fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" | "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "profiles" => Command::Send(Msg::Started),
        "use" => Command::Send(Msg::ProfileChosen(rest.to_string())),
        "add-profile" => Command::Send(Msg::ProfileCreateRequested(parse_new_profile(rest)?)),
        "remove-profile" => {
            Command::Send(Msg::ProfileDeleteRequested(required(rest, "profile name")?))
        }
        "test" => Command::Send(Msg::ConnectionTestRequested(required(rest, "profile name")?)),
        "dir" if rest.is_empty() => Command::Show,
        "dir" => Command::Send(Msg::DirectoryChosen(rest.to_string())),
        "refresh" => Command::Send(Msg::RefreshFilesClicked),
        "select" => match rest {
            "all" => Command::Send(Msg::AllArticlesSelected(true)),
            "none" => Command::Send(Msg::AllArticlesSelected(false)),
            _ => article(rest, ArticleAction::Toggle)?,
        },
        "status" => {
            let (position, status) = split_position(rest)?;
            let status = ArticleStatus::parse(status)
                .ok_or_else(|| format!("unknown status '{status}', use draft or publish"))?;
            article_at(position, ArticleAction::Status(status))
        }
        "image" => {
            let (position, file) = split_position(rest)?;
            if file.is_empty() {
                return Err("image needs a file path".to_string());
            }
            article_at(position, ArticleAction::Image(PathBuf::from(file)))
        }
        "no-image" => article(rest, ArticleAction::ClearImage)?,
        "categories" | "tags" => {
            let kind = if word == "tags" {
                TaxonomyKind::Tags
            } else {
                TaxonomyKind::Categories
            };
            if rest.is_empty() {
                Command::Send(Msg::GlobalTaxonomyOpened(kind))
            } else {
                article(rest, ArticleAction::Taxonomy(kind))?
            }
        }
        "search" => Command::Send(Msg::TaxonomySearchChanged(rest.to_string())),
        "check" => {
            let id = rest
                .parse()
                .map_err(|_| format!("'{rest}' is not an entry id"))?;
            Command::Send(Msg::TaxonomyItemToggled(id))
        }
        "check-all" => Command::Send(Msg::TaxonomySelectAll),
        "uncheck-all" => Command::Send(Msg::TaxonomyDeselectAll),
        "new" => Command::Send(Msg::TaxonomyCreateRequested(rest.to_string())),
        "ok" => Command::Send(Msg::TaxonomyAccepted),
        "cancel" => Command::Send(Msg::TaxonomyCancelled),
        "scope" => {
            let scope = match rest {
                "all" => ScopeArg::All,
                "visible" => ScopeArg::Visible,
                other => return Err(format!("unknown scope '{other}', use all or visible")),
            };
            Command::Send(Msg::SelectAllScopeChanged(scope.into()))
        }
        "publish" => Command::Send(Msg::PublishClicked),
        "stop" => Command::Send(Msg::CancelPublishClicked),
        other => return Err(format!("unknown command '{other}', try help")),
    };
    Ok(command)
}

fn required(rest: &str, what: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("{what} is required"))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("'{raw}' is not an article number")),
    }
}

fn split_position(rest: &str) -> Result<(usize, &str), String> {
    let (position, tail) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));
    Ok((parse_position(position)?, tail.trim()))
}

fn article(rest: &str, action: ArticleAction) -> Result<Command, String> {
    Ok(article_at(parse_position(rest)?, action))
}

fn article_at(position: usize, action: ArticleAction) -> Command {
    Command::Article { position, action }
}

fn parse_new_profile(rest: &str) -> Result<NewProfile, String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [name, url, username, password @ ..] if !password.is_empty() => Ok(NewProfile {
            name: (*name).to_string(),
            url: (*url).to_string(),
            username: (*username).to_string(),
            app_password: password.join(" "),
        }),
        _ => Err("usage: add-profile <name> <url> <user> <password>".to_string()),
    }
}
