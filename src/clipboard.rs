//! Clipboard copy/paste over a drag selection.
//!
//! Copy serializes the selected cells one per line. Paste splits clipboard
//! text on newlines and tabs into a flat value list and writes it either into
//! the selection or, when only an anchor cell is known, down the anchor's
//! column.
//!
//! Clipboard failures are returned to the caller and never touch the
//! selection or the active cell.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};
use thiserror::Error;

use crate::cell::CellCoord;
use crate::drag_select::DragSelection;
use crate::keys::{ClipboardShortcut, KeyInput, KeyOutcome};
use crate::traits::{ClipboardBackend, ClipboardHost};

/// Errors raised by a [`ClipboardBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read clipboard: {0}")]
    Read(String),
    #[error("failed to write clipboard: {0}")]
    Write(String),
    #[error("clipboard reader stopped before returning any text")]
    Disconnected,
}

/// Splits clipboard text into a flat list of values.
///
/// The text is trimmed and stripped of `\r`, then split on every `\n` and
/// `\t`. Row/column structure is not preserved; see [`ClipboardGrid`] for that.
pub fn parse_clipboard_values(text: &str) -> Vec<String> {
    text.trim()
        .replace('\r', "")
        .split(['\n', '\t'])
        .map(str::to_string)
        .collect()
}

/// Joins serialized cell values the way copy writes them.
pub fn join_copied_values(values: &[String]) -> String {
    values.join("\n")
}

/// Paste-time information about the navigation cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasteAnchor {
    /// The navigator's active cell, used when nothing is selected.
    pub active_cell: Option<CellCoord>,
    /// Grid height. Without it the fill-down path is never taken.
    pub row_count: Option<usize>,
}

impl PasteAnchor {
    pub fn new(active_cell: Option<CellCoord>, row_count: usize) -> Self {
        Self {
            active_cell,
            row_count: Some(row_count),
        }
    }
}

/// Resolves which cells receive `value_count` pasted values.
///
/// - One selected cell, or no selection but an active cell: fill down from
///   that anchor, clipped at the grid height.
/// - Otherwise the selection itself, in order.
pub fn resolve_paste_targets(selection: &[CellCoord], anchor: PasteAnchor, value_count: usize) -> Vec<CellCoord> {
    let fill_from = match (selection, anchor.row_count) {
        ([only], Some(rows)) => Some((*only, rows)),
        ([], Some(rows)) => anchor.active_cell.map(|cell| (cell, rows)),
        _ => None,
    };

    match fill_from {
        Some((start, rows)) => (0..value_count)
            .map(|i| start.row + i)
            .take_while(|&row| row < rows)
            .map(|row| CellCoord::new(row, start.col))
            .collect(),
        None => selection.to_vec(),
    }
}

/// The selection and anchor captured when a paste was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteRequest {
    pub selection: Vec<CellCoord>,
    pub anchor: PasteAnchor,
}

impl PasteRequest {
    pub fn new(selection: &[CellCoord], anchor: PasteAnchor) -> Self {
        Self {
            selection: selection.to_vec(),
            anchor,
        }
    }

    /// Parses `text` and resolves its target cells.
    pub fn resolve(&self, text: &str) -> PastePlan {
        let values = parse_clipboard_values(text);
        let targets = resolve_paste_targets(&self.selection, self.anchor, values.len());
        debug!("paste resolved {} values onto {} cells", values.len(), targets.len());
        PastePlan { targets, values }
    }
}

/// Parsed clipboard values and the cells they go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastePlan {
    pub targets: Vec<CellCoord>,
    pub values: Vec<String>,
}

impl PastePlan {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Hands the plan to the host. Does nothing when no cell was resolved.
    ///
    /// Returns true if `on_paste` ran.
    pub fn apply<C, H: ClipboardHost<C> + ?Sized>(&self, host: &mut H, context: &C) -> bool {
        if self.targets.is_empty() {
            return false;
        }
        host.on_paste(&self.targets, &self.values, context);
        true
    }
}

/// Drag-select and clipboard engine.
///
/// Wraps a [`DragSelection`] together with the opaque context that is passed
/// unchanged to the host's copy and paste callbacks.
#[derive(Debug, Clone, Default)]
pub struct DragCopy<C> {
    selection: DragSelection,
    context: C,
}

impl<C> DragCopy<C> {
    pub fn new(context: C) -> Self {
        Self {
            selection: DragSelection::new(),
            context,
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Replaces the context, e.g. after the host reloaded its labels.
    pub fn set_context(&mut self, context: C) {
        self.context = context;
    }

    pub fn selection(&self) -> &DragSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut DragSelection {
        &mut self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    pub fn preview_cells(&self) -> &[CellCoord] {
        self.selection.preview_cells()
    }

    pub fn is_preview_cell(&self, row: usize, col: usize) -> bool {
        self.selection.is_preview_cell(row, col)
    }

    pub fn drag_start(&mut self, row: usize, col: usize) {
        self.selection.drag_start(row, col);
    }

    pub fn drag_move(&mut self, row: usize, col: usize) {
        self.selection.drag_move(row, col);
    }

    pub fn drag_end(&mut self) {
        self.selection.drag_end();
    }

    pub fn reset(&mut self) {
        self.selection.reset();
    }

    /// Copies the selection to `backend`.
    ///
    /// Returns `Ok(false)` without touching the clipboard when nothing is
    /// selected.
    pub fn copy<H, B>(&self, host: &H, backend: &mut B) -> Result<bool, ClipboardError>
    where
        H: ClipboardHost<C> + ?Sized,
        B: ClipboardBackend + ?Sized,
    {
        let cells = self.selection.preview_cells();
        if cells.is_empty() {
            return Ok(false);
        }

        let values = host.on_copy(cells, &self.context);
        let text = join_copied_values(&values);
        backend.write_text(&text).inspect_err(|e| warn!("copy failed: {}", e))?;
        debug!("copied {} cells", cells.len());
        Ok(true)
    }

    /// Snapshots the selection for a paste.
    pub fn paste_request(&self, anchor: PasteAnchor) -> PasteRequest {
        PasteRequest::new(self.selection.preview_cells(), anchor)
    }

    /// Pastes already-available clipboard text. Returns the cells written.
    pub fn paste_text<H>(&self, host: &mut H, text: &str, anchor: PasteAnchor) -> Vec<CellCoord>
    where
        H: ClipboardHost<C> + ?Sized,
    {
        let plan = self.paste_request(anchor).resolve(text);
        plan.apply(host, &self.context);
        plan.targets
    }

    /// Reads `backend` synchronously and pastes. Returns the cells written.
    pub fn paste<H, B>(&self, host: &mut H, backend: &mut B, anchor: PasteAnchor) -> Result<Vec<CellCoord>, ClipboardError>
    where
        H: ClipboardHost<C> + ?Sized,
        B: ClipboardBackend + ?Sized,
    {
        let text = backend.read_text().inspect_err(|e| warn!("paste failed: {}", e))?;
        Ok(self.paste_text(host, &text, anchor))
    }

    /// Starts reading `backend` on a background thread.
    ///
    /// The selection is captured now; poll the returned [`PendingPaste`] and
    /// apply its plan with [`PastePlan::apply`].
    pub fn request_paste<B>(&self, backend: B, anchor: PasteAnchor) -> PendingPaste
    where
        B: ClipboardBackend + Send + 'static,
    {
        PendingPaste::spawn(backend, self.paste_request(anchor))
    }

    /// Handles Ctrl/Cmd+C and Ctrl/Cmd+V synchronously.
    ///
    /// Copy with an empty selection is ignored so the host keeps its default
    /// behaviour. Any other key is ignored.
    pub fn handle_key<H, B>(
        &self,
        input: &KeyInput,
        host: &mut H,
        backend: &mut B,
        anchor: PasteAnchor,
    ) -> Result<KeyOutcome, ClipboardError>
    where
        H: ClipboardHost<C> + ?Sized,
        B: ClipboardBackend + ?Sized,
    {
        match ClipboardShortcut::from_key(input) {
            Some(ClipboardShortcut::Copy) => {
                if self.copy(host, backend)? {
                    Ok(KeyOutcome::Handled)
                } else {
                    Ok(KeyOutcome::Ignored)
                }
            }
            Some(ClipboardShortcut::Paste) => {
                self.paste(host, backend, anchor)?;
                Ok(KeyOutcome::Handled)
            }
            None => Ok(KeyOutcome::Ignored),
        }
    }
}

/// A clipboard read running on a background thread.
///
/// There is no timeout: a read that never finishes stays pending. Dropping
/// the value abandons the result.
pub struct PendingPaste {
    request: PasteRequest,
    receiver: Option<Receiver<Result<String, ClipboardError>>>,
}

impl PendingPaste {
    pub fn spawn<B>(mut backend: B, request: PasteRequest) -> Self
    where
        B: ClipboardBackend + Send + 'static,
    {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            let _ = sender.send(backend.read_text());
        });

        Self {
            request,
            receiver: Some(receiver),
        }
    }

    pub fn request(&self) -> &PasteRequest {
        &self.request
    }

    /// True once [`Self::try_complete`] has returned a result.
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }

    /// Returns the resolved plan once the read finished, `None` while pending.
    ///
    /// Yields a result exactly once.
    pub fn try_complete(&mut self) -> Option<Result<PastePlan, ClipboardError>> {
        let receiver = self.receiver.as_ref()?;
        let outcome = match receiver.try_recv() {
            Ok(Ok(text)) => Ok(self.request.resolve(&text)),
            Ok(Err(e)) => Err(e),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ClipboardError::Disconnected),
        };

        self.receiver = None;
        if let Err(e) = &outcome {
            warn!("paste failed: {}", e);
        }
        Some(outcome)
    }

    /// Blocks until the read finishes.
    pub fn wait(mut self) -> Result<PastePlan, ClipboardError> {
        let receiver = self.receiver.take().ok_or(ClipboardError::Disconnected)?;
        match receiver.recv() {
            Ok(Ok(text)) => Ok(self.request.resolve(&text)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ClipboardError::Disconnected),
        }
    }
}

/// In-memory clipboard for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = text.to_string();
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.clone())
    }
}

/// Clipboard text parsed into rows and columns, as spreadsheets copy it.
///
/// Rows split on `\r?\n`, columns on `\t`. One trailing all-empty row (the
/// newline spreadsheets append) is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardGrid {
    rows: Vec<Vec<String>>,
}

impl ClipboardGrid {
    pub fn parse(text: &str) -> Self {
        let mut rows: Vec<Vec<String>> = text
            .split('\n')
            .map(|line| {
                line.strip_suffix('\r')
                    .unwrap_or(line)
                    .split('\t')
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        let trailing_blank = rows
            .last()
            .is_some_and(|row| row.iter().all(|cell| cell.is_empty()));
        if rows.len() > 1 && trailing_blank {
            rows.pop();
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Places the grid at `start`, dropping anything past the grid edges.
    pub fn targets(&self, start: CellCoord, row_count: usize, col_count: usize) -> Vec<(CellCoord, &str)> {
        let mut placed = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let target_row = start.row + i;
            if target_row >= row_count {
                break;
            }
            for (j, value) in row.iter().enumerate() {
                let target_col = start.col + j;
                if target_col >= col_count {
                    break;
                }
                placed.push((CellCoord::new(target_row, target_col), value.as_str()));
            }
        }
        placed
    }
}

/// Chooses where a block paste starts: the active cell, otherwise the
/// top-left-most selected cell.
pub fn determine_start_cell(active: Option<CellCoord>, selection: &[CellCoord]) -> Option<CellCoord> {
    active.or_else(|| selection.iter().min().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Column {
        values: Vec<String>,
        pasted: Vec<(Vec<CellCoord>, Vec<String>)>,
    }

    impl ClipboardHost<&'static str> for Column {
        fn on_copy(&self, cells: &[CellCoord], context: &&'static str) -> Vec<String> {
            assert_eq!(*context, "ctx");
            cells.iter().map(|c| self.values[c.row].clone()).collect()
        }

        fn on_paste(&mut self, cells: &[CellCoord], values: &[String], context: &&'static str) {
            assert_eq!(*context, "ctx");
            self.pasted.push((cells.to_vec(), values.to_vec()));
        }
    }

    struct BrokenClipboard;

    impl ClipboardBackend for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Write("denied".to_string()))
        }

        fn read_text(&mut self) -> Result<String, ClipboardError> {
            Err(ClipboardError::Read("denied".to_string()))
        }
    }

    fn column() -> Column {
        Column {
            values: vec!["10".into(), "20".into(), "30".into(), "40".into()],
            pasted: Vec::new(),
        }
    }

    #[test]
    fn test_parse_values_strips_and_flattens() {
        assert_eq!(parse_clipboard_values("1\t2\r\n3\t4\r\n"), vec!["1", "2", "3", "4"]);
        assert_eq!(parse_clipboard_values("  7  "), vec!["7"]);
        assert_eq!(parse_clipboard_values(""), vec![""]);
        assert_eq!(parse_clipboard_values("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_resolve_multi_selection_uses_selection_order() {
        let selection = [CellCoord::new(1, 0), CellCoord::new(2, 0)];
        let anchor = PasteAnchor::new(Some(CellCoord::new(0, 0)), 10);
        assert_eq!(resolve_paste_targets(&selection, anchor, 5), selection.to_vec());
    }

    #[test]
    fn test_resolve_single_selection_fills_down() {
        let selection = [CellCoord::new(1, 2)];
        let anchor = PasteAnchor::new(Some(CellCoord::new(0, 0)), 10);
        assert_eq!(
            resolve_paste_targets(&selection, anchor, 2),
            vec![CellCoord::new(1, 2), CellCoord::new(2, 2)]
        );
    }

    #[test]
    fn test_resolve_without_row_count_skips_fill_down() {
        let selection = [CellCoord::new(1, 2)];
        let anchor = PasteAnchor { active_cell: None, row_count: None };
        assert_eq!(resolve_paste_targets(&selection, anchor, 3), selection.to_vec());

        let anchor = PasteAnchor { active_cell: Some(CellCoord::new(0, 0)), row_count: None };
        assert!(resolve_paste_targets(&[], anchor, 3).is_empty());
    }

    #[test]
    fn test_copy_empty_selection_leaves_clipboard_alone() {
        let engine = DragCopy::new("ctx");
        let mut clipboard = MemoryClipboard::with_text("keep");
        assert!(!engine.copy(&column(), &mut clipboard).unwrap());
        assert_eq!(clipboard.text(), "keep");
    }

    #[test]
    fn test_copy_failure_is_returned() {
        let mut engine = DragCopy::new("ctx");
        engine.drag_start(0, 0);
        let err = engine.copy(&column(), &mut BrokenClipboard).unwrap_err();
        assert_eq!(err, ClipboardError::Write("denied".to_string()));
        assert_eq!(engine.preview_cells(), &[CellCoord::new(0, 0)]);
    }

    #[test]
    fn test_paste_failure_keeps_selection() {
        let mut engine = DragCopy::new("ctx");
        engine.drag_start(1, 0);
        engine.drag_move(2, 0);
        let mut host = column();

        let result = engine.paste(&mut host, &mut BrokenClipboard, PasteAnchor::new(None, 4));
        assert!(result.is_err());
        assert!(host.pasted.is_empty());
        assert_eq!(engine.preview_cells().len(), 2);
    }

    #[test]
    fn test_handle_key_routes_shortcuts() {
        use crate::keys::{Key, Modifiers};

        let mut engine = DragCopy::new("ctx");
        let mut host = column();
        let mut clipboard = MemoryClipboard::new();
        let anchor = PasteAnchor::new(None, 4);

        let ctrl_c = KeyInput::new(Key::Character('c'), Modifiers::CTRL);
        assert_eq!(engine.handle_key(&ctrl_c, &mut host, &mut clipboard, anchor), Ok(KeyOutcome::Ignored));

        engine.drag_start(2, 0);
        engine.drag_move(3, 0);
        assert_eq!(engine.handle_key(&ctrl_c, &mut host, &mut clipboard, anchor), Ok(KeyOutcome::Handled));
        assert_eq!(clipboard.text(), "30\n40");

        let plain = KeyInput::char('x');
        assert_eq!(engine.handle_key(&plain, &mut host, &mut clipboard, anchor), Ok(KeyOutcome::Ignored));
    }

    #[test]
    fn test_pending_paste_uses_snapshot() {
        let mut engine = DragCopy::new("ctx");
        engine.drag_start(0, 0);

        let pending = engine.request_paste(MemoryClipboard::with_text("1\n2"), PasteAnchor::new(None, 4));
        // Selection changes after the request do not affect the result
        engine.reset();

        let plan = pending.wait().unwrap();
        assert_eq!(plan.targets, vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]);

        let mut host = column();
        assert!(plan.apply(&mut host, engine.context()));
        assert_eq!(host.pasted.len(), 1);
    }

    #[test]
    fn test_pending_paste_yields_once() {
        let engine: DragCopy<&'static str> = DragCopy::new("ctx");
        let mut pending = engine.request_paste(BrokenClipboard, PasteAnchor::new(Some(CellCoord::new(0, 0)), 2));

        let result = loop {
            if let Some(result) = pending.try_complete() {
                break result;
            }
            thread::yield_now();
        };
        assert_eq!(result, Err(ClipboardError::Read("denied".to_string())));
        assert!(pending.is_finished());
        assert!(pending.try_complete().is_none());
    }

    #[test]
    fn test_clipboard_grid_drops_trailing_blank_row() {
        let grid = ClipboardGrid::parse("1\t2\r\n3\t4\r\n");
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.rows()[1], vec!["3", "4"]);
    }

    #[test]
    fn test_clipboard_grid_targets_clip_to_grid() {
        let grid = ClipboardGrid::parse("1\t2\t3\n4\t5\t6\n7\t8\t9");
        let placed = grid.targets(CellCoord::new(1, 1), 3, 3);
        assert_eq!(
            placed,
            vec![
                (CellCoord::new(1, 1), "1"),
                (CellCoord::new(1, 2), "2"),
                (CellCoord::new(2, 1), "4"),
                (CellCoord::new(2, 2), "5"),
            ]
        );
    }

    #[test]
    fn test_determine_start_cell_prefers_active() {
        let selection = [CellCoord::new(4, 1), CellCoord::new(2, 3), CellCoord::new(2, 1)];
        assert_eq!(determine_start_cell(Some(CellCoord::new(7, 0)), &selection), Some(CellCoord::new(7, 0)));
        assert_eq!(determine_start_cell(None, &selection), Some(CellCoord::new(2, 1)));
        assert_eq!(determine_start_cell(None, &[]), None);
    }
}
