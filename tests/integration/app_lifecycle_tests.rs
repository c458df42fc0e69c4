/*!
 * Controller workflow tests over real files
 */

use anyhow::Result;
use deckglot::app_config::Config;
use deckglot::app_controller::Controller;
use deckglot::providers::mock::MockProvider;

use crate::common;

fn controller_with(provider: MockProvider, target_language: &str) -> Result<Controller> {
    let mut config = Config::default();
    config.target_language = target_language.to_string();
    Controller::with_translator(config, common::translator_with(vec![Box::new(provider)]))
}

#[test]
fn test_controller_withInvalidConfig_shouldFailToBuild() {
    let mut config = Config::default();
    config.target_language = "auto".to_string();
    assert!(Controller::with_config(config).is_err());
}

#[tokio::test]
async fn test_run_shouldWriteTranslatedCopyNextToInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "Greeting.pptx",
        &common::sample_presentation(&["Hello", "World"], &[]),
    )?;
    let controller = controller_with(common::greeting_provider(), "FR")?;

    let output = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;

    let output = output.expect("output written");
    assert_eq!(output, temp_dir.path().join("Greeting.fr.pptx"));
    let bytes = std::fs::read(&output)?;
    assert_eq!(common::read_entry(&bytes, "ppt/slides/slide1.xml"), common::slide_xml(&["Bonjour", "Monde"]));
    Ok(())
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "deck.pptx",
        &common::sample_presentation(&["Hello"], &[]),
    )?;
    common::create_test_file(temp_dir.path(), "deck.ru.pptx", b"old output")?;
    let provider = MockProvider::working();
    let controller = controller_with(provider.clone(), "RU")?;

    let skipped = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    assert!(skipped.is_none());
    assert_eq!(provider.request_count(), 0);
    assert_eq!(std::fs::read(temp_dir.path().join("deck.ru.pptx"))?, b"old output".to_vec());

    let forced = controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert!(forced.is_some());
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_withNonArchiveInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "notes.pptx", b"plain text")?;
    let controller = controller_with(MockProvider::working(), "RU")?;

    assert!(controller.run(input, temp_dir.path().to_path_buf(), false).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_shouldTranslateEveryDeckOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("q3");
    std::fs::create_dir_all(&nested)?;
    let deck = common::sample_presentation(&["Hello"], &[]);
    common::create_test_file(temp_dir.path(), "a.pptx", &deck)?;
    common::create_test_file(&nested, "b.pptx", &deck)?;
    common::create_test_file(temp_dir.path(), "readme.txt", b"ignore me")?;
    let controller = controller_with(common::greeting_provider(), "FR")?;

    let written = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(written, 2);
    assert!(temp_dir.path().join("a.fr.pptx").exists());
    assert!(nested.join("b.fr.pptx").exists());

    // outputs from the first pass are neither retranslated nor overwritten
    let second_pass = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(second_pass, 0);
    assert!(!temp_dir.path().join("a.fr.fr.pptx").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withRegionTarget_shouldSkipItsOwnOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "deck.pptx", &common::sample_presentation(&["Hello"], &[]))?;
    let provider = MockProvider::working();
    let controller = controller_with(provider.clone(), "pt_BR")?;

    let written = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(written, 1);
    assert!(temp_dir.path().join("deck.pt-br.pptx").exists());

    let second_pass = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(second_pass, 0);
    assert_eq!(provider.request_count(), 1);
    assert!(!temp_dir.path().join("deck.pt-br.pt-br.pptx").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_folder_withMissingDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller_with(MockProvider::working(), "RU")?;

    assert!(controller.run_folder(temp_dir.path().join("missing"), false).await.is_err());
    Ok(())
}
