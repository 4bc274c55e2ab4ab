use prep_core::model::{
    NoteDraft, Question, QuestionId, QuestionSetKey, StudyBlock, StudyChapter, StudyContent,
};
use prep_core::time::fixed_now;
use storage::repository::{InMemoryRepository, Storage, StorageError};

#[tokio::test]
async fn seeded_storage_serves_every_dataset() {
    let storage = Storage::seeded().expect("seed");

    let algebra = storage
        .questions
        .load_questions(&QuestionSetKey::practice("mathematics", "algebra"))
        .await
        .unwrap();
    assert_eq!(algebra.len(), 4);
    assert!(algebra.iter().all(|q| q.explanation().is_some()));

    let notes = storage.notes.list_notes().await.unwrap();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].title, "Calculus Integration Techniques");

    let saved = storage.saved_questions.list_saved_questions().await.unwrap();
    assert_eq!(saved.len(), 2);

    let chapters = storage.study.load_chapters("physics", "mechanics").await.unwrap();
    let kinds: Vec<_> = chapters[0].blocks.iter().map(|b| b.content.kind()).collect();
    assert_eq!(kinds, ["text", "image", "video", "quiz", "formula"]);
    assert!(matches!(
        chapters[0].blocks[3].content,
        StudyContent::Quiz { ref questions } if questions.len() == 3
    ));
}

#[tokio::test]
async fn repositories_share_state_through_the_aggregate() {
    let storage = Storage::in_memory();
    let draft = NoteDraft {
        title: "Ohm".into(),
        content: "V = IR".into(),
        subject: "Physics".into(),
        tags: "circuits, ,laws".into(),
        ..NoteDraft::default()
    };
    let note = storage
        .notes
        .insert_note(draft.validate(fixed_now()).unwrap())
        .await
        .unwrap();
    assert_eq!(note.tags, vec!["circuits", "laws"]);

    storage.notes.delete_note(note.id).await.unwrap();
    assert!(matches!(
        storage.notes.get_note(note.id).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn registered_sets_and_chapters_are_served() {
    let repo = InMemoryRepository::new();
    let key = QuestionSetKey::mock("chemistry", "2022");
    let question = Question::new(
        QuestionId::from("chem-1"),
        "Symbol for sodium?",
        vec!["S".into(), "Na".into()],
        1,
    )
    .unwrap();
    repo.put_question_set(key.clone(), vec![question.clone()]).unwrap();
    repo.put_chapters(
        "chemistry",
        "bonding",
        vec![StudyChapter {
            id: "ionic".into(),
            title: "Ionic bonds".into(),
            description: "Electron transfer".into(),
            estimated_minutes: 10,
            blocks: vec![StudyBlock {
                id: "intro".into(),
                title: None,
                content: StudyContent::Text {
                    markdown: "Metals give electrons to non-metals.".into(),
                },
            }],
        }],
    )
    .unwrap();

    let storage = Storage::from_repo(repo);
    assert_eq!(storage.questions.load_questions(&key).await.unwrap(), vec![question]);
    let chapters = storage.study.load_chapters("chemistry", "bonding").await.unwrap();
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].blocks[0].content.kind(), "text");
    assert!(
        storage
            .study
            .load_chapters("chemistry", "acids")
            .await
            .unwrap()
            .is_empty()
    );
}
