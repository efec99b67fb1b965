//! Built-in en-de sample dataset
//!
//! Ten tokenized sentence pairs from an Adobe localization corpus with
//! gold word tags (interleaved gap-tag layout) and HTER scores, so the
//! browser and gold estimator work before any dataset is registered.

pub const SOURCE_SENTENCES: [&str; 10] = [
    "to add or remove pixels when resizing so the image retains approximately the same appearance at a different size , select Resample Image .",
    "to update all assignments in the current document , choose Update All Assignments from the Assignments panel menu .",
    "in the Options tab , click the Custom button and enter lower values for Error Correction Level and Y / X Ratio .",
    "for example , you could create a document containing a car that moves across the Stage .",
    "in the New From Template dialog box , locate and select a template , and click New .",
    "make sure that you obtained the security settings file from a source that you trust .",
    "makes a rectangular selection ( or a square , when used with the Shift key ) .",
    "drag diagonally from the corner where you want the graph to begin to the opposite corner .",
    "enter a value from -100 % to 100 % to specify the percentage by which to decrease or increase the color or the spot-color tint .",
    "you can enable the Contribute publishing server using this dialog box .",
];

pub const TARGET_SENTENCES: [&str; 10] = [
    r#"wählen Sie " Bild neu berechnen , " um beim Ändern der Bildgröße Pixel hinzuzufügen oder zu entfernen , damit das Bild ungefähr dieselbe Größe aufweist wie die andere Größe ."#,
    r#"wenn Sie alle Aufgaben im aktuellen Dokument aktualisieren möchten , wählen Sie im Menü des Aufgabenbedienfelds die Option " Alle Aufgaben aktualisieren . ""#,
    r#"klicken Sie auf der Registerkarte " Optionen " auf die Schaltfläche " Benutzerdefiniert " und geben Sie Werte für " Fehlerkorrektur-Level " und " Y / X-Verhältnis " ein ."#,
    "Sie können beispielsweise ein Dokument erstellen , das ein Auto über die Bühne enthält .",
    r#"wählen Sie im Dialogfeld " Neu aus Vorlage " eine Vorlage aus und klicken Sie auf " Neu . ""#,
    "stellen Sie sicher , dass Sie die Datei für die Sicherheitseinstellungen von einer vertrauenswürdigen Quelle stammen .",
    "erstellt eine rechteckige Auswahl ( oder ein Quadrat , wenn sie mit der Umschalttaste verwendet wird ) .",
    "ziehen Sie den Zeiger an die Stelle , an der das Diagramm mit der anderen Ecke beginnen soll .",
    "geben Sie einen Wert zwischen -100 % und 100 % ein , um den Prozentwert festzulegen , um den die Farbe oder der Volltonfarbton zu verringern oder zu erhöhen .",
    "Sie können den Contribute-Veröffentlichungsserver über dieses Dialogfeld aktivieren .",
];

pub const TARGET_TAGS: [&str; 10] = [
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK BAD OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK BAD OK OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK BAD OK OK OK OK OK OK BAD OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK BAD OK OK OK OK OK BAD OK BAD OK OK OK BAD OK OK OK OK OK OK OK BAD OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK BAD OK BAD OK OK OK OK OK BAD OK BAD OK BAD OK OK OK BAD OK OK OK OK OK OK OK",
    "OK OK OK OK BAD BAD OK BAD OK BAD OK BAD OK BAD OK OK OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK BAD OK OK OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK BAD OK BAD OK OK OK OK BAD BAD OK OK OK",
    "OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK OK",
];

pub const SENTENCE_HTER: [f32; 10] = [
    0.322581, 0.000000, 0.064516, 0.263158, 0.000000, 0.312500, 0.375000, 0.727273, 0.161290,
    0.000000,
];
