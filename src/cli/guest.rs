use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::rsvp::update_request::{UpdateRequest, UpdateRequestError};
use crate::rsvp::{EventDay, RsvpStatus};
use crate::wizard::{Confirmation, HttpRsvpApi, RsvpApi, Screen, Wizard, WizardError};

/// Read a line, `None` when the user hits Ctrl-C or Ctrl-D
fn ask(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn ask_yes_no(rl: &mut DefaultEditor, prompt: &str, current: Option<bool>) -> Result<Option<bool>> {
    let hint = match current {
        Some(true) => "[Y/n]",
        Some(false) => "[y/N]",
        None => "[y/n]",
    };
    loop {
        let Some(answer) = ask(rl, &format!("{} {} ", prompt, hint))? else {
            return Ok(None);
        };
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            "" if current.is_some() => return Ok(current),
            _ => println!("Please answer y or n"),
        }
    }
}

fn print_confirmation(confirmation: &Confirmation) {
    println!("\nThank you! Your RSVP has been received.\n");
    for block in confirmation.blocks() {
        for (i, line) in block.iter().enumerate() {
            if i == 0 {
                println!("{}", line);
            } else {
                println!("  {}", line);
            }
        }
        println!();
    }

    if let Some(calendar) = &confirmation.calendar {
        println!(
            "Add to calendar: {} ({})",
            calendar.download_path(),
            calendar.file_name
        );
    }

    println!("\n{}", confirmation.share.text);
    println!("Email:    {}", confirmation.share.email);
    println!("SMS:      {}", confirmation.share.sms);
    println!("WhatsApp: {}", confirmation.share.whatsapp);
}

/// Fill in every card. Returns false when the user bails out.
fn fill_form<A: RsvpApi>(rl: &mut DefaultEditor, wizard: &mut Wizard<A>) -> Result<bool> {
    for index in 0..wizard.cards().len() {
        let card = wizard.card_mut(index)?;
        if card.is_read_only() {
            println!(
                "{}: {} (already submitted)",
                card.name,
                card.rsvp_status().map(|s| s.as_str()).unwrap_or("No answer")
            );
            continue;
        }

        let current = card.rsvp_status().map(|s| s == RsvpStatus::Yes);
        let Some(attending) = ask_yes_no(rl, &format!("Will {} attend?", card.name), current)?
        else {
            return Ok(false);
        };
        let status = if attending {
            RsvpStatus::Yes
        } else {
            RsvpStatus::No
        };
        card.set_status(status)?;

        if !card.shows_event_fields() {
            continue;
        }
        for day in EventDay::ALL {
            let current = card.event_attendance().contains(&day);
            let prompt = format!("  {} ({})?", day.details().title, day);
            let Some(going) = ask_yes_no(rl, &prompt, Some(current))? else {
                return Ok(false);
            };
            card.set_attending(day, going)?;
        }
        let prompt = format!(
            "  Dietary requirements [{}]: ",
            card.dietary_requirements()
        );
        let Some(note) = ask(rl, &prompt)? else {
            return Ok(false);
        };
        if !note.is_empty() {
            card.set_dietary(&note)?;
        }
    }
    Ok(true)
}

fn ask_update_request(rl: &mut DefaultEditor) -> Result<Option<UpdateRequest>> {
    let Some(name) = ask(rl, "Your name: ")? else {
        return Ok(None);
    };
    let Some(email) = ask(rl, "Your email: ")? else {
        return Ok(None);
    };
    let Some(details) = ask(rl, "What would you like to change? ")? else {
        return Ok(None);
    };
    Ok(Some(UpdateRequest {
        name,
        email,
        details,
    }))
}

pub async fn run(api_url: &str) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut wizard = Wizard::new(HttpRsvpApi::new(api_url));

    loop {
        match wizard.screen() {
            Screen::PinEntry => {
                let Some(pin) = ask(&mut rl, "Enter your PIN: ")? else {
                    break;
                };
                if wizard.submit_pin(&pin).await.is_err() {
                    println!("{}", wizard.pin_error().unwrap_or_default());
                }
            }
            Screen::GuestForm => {
                let read_only = wizard.cards().iter().all(|c| c.is_read_only());
                if read_only {
                    if let Some(confirmation) = wizard.confirmation() {
                        print_confirmation(confirmation);
                    }
                    println!("\nThis RSVP has already been submitted.");
                    wizard.back_to_pin();
                    continue;
                }
                if !fill_form(&mut rl, &mut wizard)? {
                    wizard.back_to_pin();
                    continue;
                }
                if wizard.submit().await.is_err() {
                    println!("{}", wizard.alert().unwrap_or_default());
                }
            }
            Screen::Confirmation => {
                if let Some(confirmation) = wizard.confirmation() {
                    print_confirmation(confirmation);
                }
                let Some(choice) = ask(&mut rl, "\n[u] request an update, [p] new PIN, [q] quit: ")?
                else {
                    break;
                };
                match choice.as_str() {
                    "u" => wizard.request_update()?,
                    "p" => wizard.back_to_pin(),
                    "q" => break,
                    _ => {}
                }
            }
            Screen::UpdateRequest => {
                if let Some(confirmation) = wizard.confirmation() {
                    println!(
                        "Guests on this invitation: {}",
                        confirmation.update_request.guest_names().join(", ")
                    );
                }
                let Some(request) = ask_update_request(&mut rl)? else {
                    wizard.back_to_confirmation()?;
                    continue;
                };
                println!("Sending...");
                match wizard.send_update_request(&request).await {
                    Ok(()) => {
                        println!("Your update request has been sent. We'll be in touch soon.");
                        wizard.back_to_confirmation()?;
                    }
                    Err(WizardError::UpdateRequest(UpdateRequestError::AlreadySent)) => {
                        println!("Your update request has already been sent.");
                        wizard.back_to_confirmation()?;
                    }
                    // Stay on the form so the request can be fixed or retried
                    Err(err) => println!("{}", err),
                }
            }
        }
    }

    Ok(())
}
