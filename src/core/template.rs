// starter templates - the base project the model builds on top of

use crate::core::prompts::{self, DESIGN_PROMPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    React,
    Node,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::React, TemplateKind::Node];

    /// Matches a model answer against the known templates. Tolerates
    /// surrounding quotes, punctuation and casing ("'React.'" still counts).
    pub fn from_answer(answer: &str) -> Option<Self> {
        let normalized = answer
            .trim_matches(|c: char| !c.is_ascii_alphanumeric())
            .to_ascii_lowercase();
        match normalized.as_str() {
            "react" => Some(Self::React),
            "node" => Some(Self::Node),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Node => "node",
        }
    }

    /// Starter artifact seeded into the plan before the first model reply.
    pub fn base_artifact(self) -> &'static str {
        match self {
            Self::React => REACT_BASE,
            Self::Node => NODE_BASE,
        }
    }

    /// Context prompts sent ahead of the user's request, in order.
    pub fn prompts(self) -> Vec<String> {
        match self {
            Self::React => vec![
                DESIGN_PROMPT.to_string(),
                prompts::artifact_context(REACT_BASE),
            ],
            Self::Node => vec![prompts::artifact_context(NODE_BASE)],
        }
    }
}

const REACT_BASE: &str = r##"<artifact id="react-starter" title="React Starter">
<action type="file" filePath="package.json">{
  "name": "react-starter",
  "private": true,
  "version": "0.0.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "vite build",
    "preview": "vite preview"
  },
  "dependencies": {
    "react": "^18.3.1",
    "react-dom": "^18.3.1"
  },
  "devDependencies": {
    "@types/react": "^18.3.5",
    "@types/react-dom": "^18.3.0",
    "@vitejs/plugin-react": "^4.3.1",
    "typescript": "^5.5.3",
    "vite": "^5.4.2"
  }
}</action>
<action type="file" filePath="index.html"><!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>React Starter</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html></action>
<action type="file" filePath="vite.config.ts">import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});</action>
<action type="file" filePath="tsconfig.json">{
  "compilerOptions": {
    "target": "ES2020",
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "moduleResolution": "bundler",
    "jsx": "react-jsx",
    "strict": true,
    "skipLibCheck": true,
    "noEmit": true
  },
  "include": ["src"]
}</action>
<action type="file" filePath="src/main.tsx">import { StrictMode } from 'react';
import { createRoot } from 'react-dom/client';
import App from './App';
import './index.css';

createRoot(document.getElementById('root')!).render(
  <StrictMode>
    <App />
  </StrictMode>
);</action>
<action type="file" filePath="src/App.tsx">function App() {
  return (
    <div className="app">
      <h1>React Starter</h1>
      <p>Describe what to build and the plan will fill this in.</p>
    </div>
  );
}

export default App;</action>
<action type="file" filePath="src/index.css">:root {
  font-family: system-ui, sans-serif;
  line-height: 1.5;
}

body {
  margin: 0;
  min-height: 100vh;
}

.app {
  max-width: 960px;
  margin: 0 auto;
  padding: 2rem;
}</action>
</artifact>"##;

const NODE_BASE: &str = r##"<artifact id="node-starter" title="Node Starter">
<action type="file" filePath="package.json">{
  "name": "node-starter",
  "private": true,
  "version": "0.0.0",
  "scripts": {
    "start": "node index.js"
  },
  "dependencies": {
    "express": "^4.19.2"
  }
}</action>
<action type="file" filePath="index.js">const express = require('express');

const app = express();
const port = process.env.PORT || 3000;

app.use(express.json());

app.get('/', (req, res) => {
  res.send('Node Starter');
});

app.listen(port, () => {
  console.log(`listening on http://localhost:${port}`);
});</action>
</artifact>"##;
