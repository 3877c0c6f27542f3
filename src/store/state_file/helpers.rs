// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct StateJson {
    #[serde(default)]
    boards: BTreeMap<String, BoardJson>,
    #[serde(default)]
    timeline: Vec<String>,
    #[serde(default)]
    active_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct BoardJson {
    #[serde(default)]
    nodes: Vec<NodeJson>,
    #[serde(default)]
    edges: Vec<EdgeJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_node_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct NodeJson {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    group: String,
    #[serde(default)]
    position: PositionJson,
    #[serde(default)]
    selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<SizeJson>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
struct PositionJson {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
struct SizeJson {
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct EdgeJson {
    id: String,
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "is_false")]
    selected: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn state_to_json(state: &TimelineState) -> StateJson {
    StateJson {
        boards: state
            .boards()
            .iter()
            .map(|(date, board)| (date.to_string(), board_to_json(board)))
            .collect(),
        timeline: state.timeline().iter().map(ToString::to_string).collect(),
        active_date: Some(state.active_date().to_string()),
    }
}

fn board_to_json(board: &Board) -> BoardJson {
    BoardJson {
        nodes: board
            .nodes()
            .iter()
            .map(|node| NodeJson {
                id: node.id().to_string(),
                label: node.label().to_owned(),
                completed: node.completed(),
                group: node.group().to_owned(),
                position: PositionJson { x: node.position().x, y: node.position().y },
                selected: node.selected(),
                size: node.size().map(|size| SizeJson { width: size.width, height: size.height }),
            })
            .collect(),
        edges: board
            .edges()
            .iter()
            .map(|edge| EdgeJson {
                id: edge.id().to_string(),
                source: edge.source().to_string(),
                target: edge.target().to_string(),
                selected: edge.selected(),
            })
            .collect(),
        selected_node_id: board.selected_node_id().map(ToString::to_string),
    }
}

fn state_from_json(path: &Path, json: StateJson) -> Result<TimelineState, StoreError> {
    if json.boards.is_empty() {
        return Err(StoreError::EmptyDocument { path: path.to_path_buf() });
    }

    let mut boards = BTreeMap::new();
    for (value, board) in json.boards {
        let date = parse_date("boards", value)?;
        let board = board_from_json(&date, board)?;
        boards.insert(date, board);
    }

    let mut timeline = BTreeSet::new();
    for value in json.timeline {
        timeline.insert(parse_date("timeline", value)?);
    }
    for date in &timeline {
        if !boards.contains_key(date) {
            warn!(date = %date, "timeline date without board; creating an empty one");
            boards.insert(date.clone(), Board::fresh());
        }
    }
    for date in boards.keys().filter(|date| !timeline.contains(*date)) {
        warn!(date = %date, "board missing from timeline; adding it");
    }

    let Some(latest) = boards.keys().next_back().cloned() else {
        return Err(StoreError::EmptyDocument { path: path.to_path_buf() });
    };
    let active_date = match json.active_date.as_deref().map(DateKey::new) {
        Some(Ok(date)) => date,
        Some(Err(err)) => {
            warn!(error = %err, fallback = %latest, "unreadable active date");
            latest
        }
        None => {
            warn!(fallback = %latest, "missing active date");
            latest
        }
    };
    if !boards.contains_key(&active_date) {
        warn!(date = %active_date, "active date without board; creating an empty one");
    }

    Ok(TimelineState::from_boards(boards, active_date))
}

fn board_from_json(date: &DateKey, json: BoardJson) -> Result<Board, StoreError> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(json.nodes.len());
    for node_json in json.nodes {
        let node_id: NodeId = parse_id("nodes.id", node_json.id)?;
        if !seen.insert(node_id.clone()) {
            warn!(date = %date, node_id = %node_id, "duplicate node dropped");
            continue;
        }

        let position = Position::new(node_json.position.x, node_json.position.y);
        let mut node = Node::new(node_id, node_json.label, position);
        node.set_completed(node_json.completed);
        node.set_group(node_json.group);
        node.set_size(node_json.size.map(|size| Size::new(size.width, size.height)));
        nodes.push(node);
    }

    let mut edges = Vec::with_capacity(json.edges.len());
    for edge_json in json.edges {
        let edge_id: EdgeId = parse_id("edges.id", edge_json.id)?;
        let source = parse_id("edges.source", edge_json.source)?;
        let target = parse_id("edges.target", edge_json.target)?;
        let mut edge = Edge::new(edge_id, source, target);
        edge.set_selected(edge_json.selected);
        edges.push(edge);
    }

    let selected: Option<NodeId> = json
        .selected_node_id
        .map(|value| parse_id("selectedNodeId", value))
        .transpose()?;

    let mut board = Board::new(nodes, edges, None);
    let pruned = board.prune_dangling_edges();
    if pruned > 0 {
        warn!(date = %date, pruned, "dangling edges dropped");
    }
    if let Some(node_id) = selected.as_ref().filter(|id| !board.contains_node(id)) {
        warn!(date = %date, node_id = %node_id, "dangling selection cleared");
    }
    board.select_only(selected.as_ref());

    Ok(board)
}

fn parse_id<T>(field: &'static str, value: String) -> Result<crate::model::Id<T>, StoreError> {
    crate::model::Id::new(value.clone()).map_err(|source| StoreError::InvalidId {
        field,
        value,
        source,
    })
}

fn parse_date(field: &'static str, value: String) -> Result<DateKey, StoreError> {
    DateKey::new(value.clone()).map_err(|source| StoreError::InvalidDate {
        field,
        value,
        source,
    })
}

static TEMP_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_path = parent.join(format!(
        ".mindline.tmp.{}.{}.{nanos}.{counter}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: tmp_path, source });
    }

    if durability == WriteDurability::Durable {
        if let Err(source) = file.sync_all() {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io { path: tmp_path, source });
        }
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
            dir.sync_all()
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
