//! Gathering a run's inputs, from the command line or interactively

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::collect::{collect_images, parse_page_url, CollectOptions, Extensions, Fetcher};
use crate::error::{Error, Result};
use crate::naming::{default_output_name, output_file_name};
use crate::session::Session;

/// Answer at the URL prompt that ends the program
pub const CANCEL_KEYWORD: &str = "exit";

/// Asks the user one question at a time
pub trait Prompter {
    /// Show `question` and return the trimmed answer
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompts on stdout, reads answers from stdin
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        print!("{}", question);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// What the command line already supplied
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Page address; without it every missing value is asked for
    pub url: Option<String>,
    /// Accepted extensions; empty means default or ask
    pub extensions: Vec<String>,
    /// Output file name
    pub output: Option<String>,
    /// Draw the download progress bar
    pub show_progress: bool,
}

pub fn is_cancel(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(CANCEL_KEYWORD)
}

/// Resolve the inputs, collect the page, and set up the session
///
/// Questions are only asked when `request.url` is `None`: the URL first,
/// then the extensions, and the output name last, once the page is known to
/// hold images. Returns `Ok(None)` when the user cancels at the URL prompt.
/// A page without usable images is [`Error::NoImagesFound`].
pub fn prepare_session<P, F>(prompter: &mut P, fetcher: &F, request: Request) -> Result<Option<Session>>
where
    P: Prompter + ?Sized,
    F: Fetcher + ?Sized,
{
    let interactive = request.url.is_none();

    let url = match request.url {
        Some(url) => url,
        None => prompter.ask("enter url: ")?,
    };
    if is_cancel(&url) {
        return Ok(None);
    }
    let page_url = parse_page_url(&url)?;

    let extensions = if !request.extensions.is_empty() {
        Extensions::new(&request.extensions)
    } else if interactive {
        Extensions::parse(&prompter.ask(
            "enter image extensions separated by space\ndefault: webp jpg png jpeg\n==> ",
        )?)
    } else {
        Extensions::default()
    };
    if extensions.is_empty() {
        return Err(Error::General("No usable image extensions given".to_string()));
    }

    let options = CollectOptions {
        extensions,
        show_progress: request.show_progress,
    };
    let collection = collect_images(fetcher, &page_url, &options)?.require_images()?;
    tracing::info!(
        "Collected {} of {} images from \"{}\"",
        collection.images.len(),
        collection.element_count,
        collection.title
    );

    let requested = match request.output {
        Some(name) => Some(name),
        None if interactive => Some(prompter.ask(&format!(
            "enter name of pdf\n(leave empty for default name:\n{})\n==> ",
            default_output_name(&collection.title)
        ))?),
        None => None,
    };
    let output = PathBuf::from(output_file_name(requested.as_deref(), &collection.title));

    Ok(Some(Session::new(collection, output)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::MemoryFetcher;
    use image::{ImageFormat, RgbImage};
    use std::collections::VecDeque;
    use std::io::Cursor;
    use std::path::Path;

    const PAGE: &str = "https://x.test/notes/index.html";

    /// Replays canned answers and remembers the questions
    struct Scripted {
        answers: VecDeque<String>,
        questions: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                questions: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn ask(&mut self, question: &str) -> io::Result<String> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn site(body: &str) -> MemoryFetcher {
        MemoryFetcher::new()
            .with(PAGE, body)
            .with("https://x.test/notes/a.png", png(4, 4))
            .with("https://x.test/notes/b.png", png(6, 3))
    }

    const TWO_IMAGES: &str =
        "<html><head><title>Plant Cells</title></head><body><img src='a.png'><img src='b.png'></body></html>";

    #[test]
    fn test_exit_keyword_cancels_before_any_request() {
        for answer in ["exit", "EXIT"] {
            let fetcher = site(TWO_IMAGES);
            let mut prompter = Scripted::new(&[answer]);

            let session = prepare_session(&mut prompter, &fetcher, Request::default()).unwrap();

            assert!(session.is_none());
            assert_eq!(prompter.questions.len(), 1);
            assert!(fetcher.requests().is_empty());
        }
    }

    #[test]
    fn test_interactive_flow_asks_name_last() {
        let fetcher = site(TWO_IMAGES);
        let mut prompter = Scripted::new(&[PAGE, "", "notes"]);

        let session = prepare_session(&mut prompter, &fetcher, Request::default())
            .unwrap()
            .expect("session");

        assert_eq!(session.len(), 2);
        assert_eq!(session.output_path(), Path::new("notes.pdf"));
        assert_eq!(prompter.questions.len(), 3);
        assert!(prompter.questions[2].contains("Plant Cells.pdf"));
    }

    #[test]
    fn test_no_images_stops_before_name_prompt() {
        let html = "<html><body><img src='a.gif'><img src='b.gif'></body></html>";
        let fetcher = site(html);
        let mut prompter = Scripted::new(&[PAGE, "", "never used"]);

        let err = prepare_session(&mut prompter, &fetcher, Request::default()).unwrap_err();

        assert!(matches!(err, Error::NoImagesFound));
        assert_eq!(prompter.questions.len(), 2);
    }

    #[test]
    fn test_all_downloads_failing_is_no_images() {
        let html = "<html><body><img src='gone.png'><img src='also-gone.jpg'></body></html>";
        let fetcher = site(html);
        let request = Request {
            url: Some(PAGE.to_string()),
            ..Default::default()
        };

        let err = prepare_session(&mut Scripted::new(&[]), &fetcher, request).unwrap_err();
        assert!(matches!(err, Error::NoImagesFound));
    }

    #[test]
    fn test_command_line_values_skip_prompts() {
        let fetcher = site(TWO_IMAGES);
        let mut prompter = Scripted::new(&[]);
        let request = Request {
            url: Some(PAGE.to_string()),
            extensions: vec!["png".to_string()],
            output: None,
            show_progress: false,
        };

        let session = prepare_session(&mut prompter, &fetcher, request)
            .unwrap()
            .expect("session");

        assert!(prompter.questions.is_empty());
        assert_eq!(session.output_path(), Path::new("Plant Cells.pdf"));
    }

    #[test]
    fn test_unusable_extensions_rejected() {
        let fetcher = site(TWO_IMAGES);
        let request = Request {
            url: Some(PAGE.to_string()),
            extensions: vec![".".to_string()],
            ..Default::default()
        };

        let err = prepare_session(&mut Scripted::new(&[]), &fetcher, request).unwrap_err();
        assert!(matches!(err, Error::General(_)));
        assert!(fetcher.requests().is_empty());
    }
}
